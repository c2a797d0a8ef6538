//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::Settings;
use crate::models::DesignMode;
use crate::services::LoadOptions;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Catalog root: a directory holding `data/xml/...` or an `http(s)://` URL
    pub xml_root: String,
    /// Directory uploaded photos are stored in
    pub upload_dir: PathBuf,
    /// Public URL prefix uploaded photos are served under
    pub upload_url: String,
    /// SQLite database holding orders
    pub database: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        // Keep data next to the config file when the platform dir is known
        let base = Config::config_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            xml_root: "public".to_string(),
            upload_dir: base.join("uploads"),
            upload_url: "/uploads".to_string(),
            database: base.join("orders.db"),
        }
    }
}

/// Catalog and locale defaults for design sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Language code countries are looked up by (`en_EN`)
    pub language: String,
    /// Two-letter country; `au` also loads promo codes
    pub country: String,
    /// ISO currency code prices are shown in
    pub currency: String,
    /// Unit system label (`mm`, `inches`)
    pub metric: String,
    /// Which designer surface loads the catalog
    pub mode: DesignMode,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            language: "en_EN".to_string(),
            country: "au".to_string(),
            currency: "AUD".to_string(),
            metric: "mm".to_string(),
            mode: DesignMode::default(),
        }
    }
}

impl CatalogConfig {
    /// Session settings seeded from this configuration.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            language: self.language.clone(),
            currency: self.currency.clone(),
            metric: self.metric.clone(),
        }
    }

    /// Load options for a product, using the configured locale and mode.
    #[must_use]
    pub fn load_options(&self, product_id: &str) -> LoadOptions {
        LoadOptions::new(product_id, self.language.clone())
            .with_country(self.country.clone())
            .with_mode(self.mode)
    }
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/MonumentDesigner/config.toml`
/// - macOS: `~/Library/Application Support/MonumentDesigner/config.toml`
/// - Windows: `%APPDATA%\MonumentDesigner\config.toml`
///
/// # Validation
///
/// - `catalog.language` must look like `en_EN`
/// - `catalog.country` must be two letters
/// - `paths.xml_root` must not be empty
/// - `server.port` must not be 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// Catalog and locale defaults
    pub catalog: CatalogConfig,
    /// Web server settings
    pub server: ServerConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/MonumentDesigner/`
    /// - macOS: `~/Library/Application Support/MonumentDesigner/`
    /// - Windows: `%APPDATA%\MonumentDesigner\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("MonumentDesigner");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file, defaulting when it is absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let language_code =
            Regex::new(r"^[a-z]{2}_[A-Z]{2}$").context("Failed to compile language pattern")?;
        if !language_code.is_match(&self.catalog.language) {
            anyhow::bail!(
                "Invalid language code '{}': expected the form en_EN",
                self.catalog.language
            );
        }

        let country = &self.catalog.country;
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            anyhow::bail!("Invalid country '{country}': expected a two-letter code");
        }

        if self.paths.xml_root.trim().is_empty() {
            anyhow::bail!("Catalog root (paths.xml_root) must not be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must not be 0");
        }

        Ok(())
    }
}
