//! Shared types for CLI commands.

use std::fmt;
use std::process;

use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::error::CatalogError;
use crate::models::{Catalog, DesignMode};
use crate::services::{source_for_root, CatalogLoader, LoadOptions, LoadToken};

/// Process exit codes used by CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Bad input: invalid arguments, unknown product
    Validation = 1,
    /// I/O failure: config, catalog fetch, server bind
    Io = 2,
}

impl ExitCode {
    /// Exits the process with this code.
    pub fn exit(self) -> ! {
        process::exit(self as i32)
    }
}

/// Error raised by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Process exit code the command ends with
    pub code: ExitCode,
    /// Human-readable reason printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid arguments or catalog data.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// Filesystem or network failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::ProductNotFound(_)
            | CatalogError::UnknownLanguage(_)
            | CatalogError::LanguageNotFound(_) => Self::validation(e.to_string()),
            _ => Self::io(format!("Failed to load catalog: {e}")),
        }
    }
}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Arguments shared by commands that load a product catalog.
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Product id to load
    #[arg(value_name = "PRODUCT_ID")]
    pub product: String,

    /// Language code (defaults to the configured language)
    #[arg(long, value_name = "CODE")]
    pub lang: Option<String>,

    /// Two-letter country code (defaults to the configured country)
    #[arg(long, value_name = "CC")]
    pub country: Option<String>,

    /// Design mode: 2d, 3d or web
    #[arg(long, value_name = "MODE")]
    pub mode: Option<DesignMode>,

    /// Catalog root directory or URL (overrides the config file)
    #[arg(long, value_name = "ROOT")]
    pub xml_root: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CatalogArgs {
    /// Configuration with command-line overrides applied.
    pub fn config(&self) -> CliResult<Config> {
        let mut config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e}")))?;
        if let Some(root) = &self.xml_root {
            config.paths.xml_root.clone_from(root);
        }
        if let Some(lang) = &self.lang {
            config.catalog.language.clone_from(lang);
        }
        if let Some(country) = &self.country {
            config.catalog.country.clone_from(country);
        }
        if let Some(mode) = self.mode {
            config.catalog.mode = mode;
        }
        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid option: {e}")))?;
        Ok(config)
    }

    /// Load options for the requested product.
    #[must_use]
    pub fn options(&self, config: &Config) -> LoadOptions {
        config.catalog.load_options(&self.product)
    }

    /// Loads the requested product catalog.
    pub async fn load(&self, config: &Config) -> CliResult<Catalog> {
        let source = source_for_root(&config.paths.xml_root)
            .map_err(|e| CliError::io(format!("Failed to open catalog root: {e}")))?;
        let catalog = CatalogLoader::new(source)
            .load(&self.options(config), &LoadToken::new())
            .await?;
        Ok(catalog)
    }
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
