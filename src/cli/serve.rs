//! Serve command: run the web API.

use std::net::SocketAddr;

use clap::Args;
use tracing::info;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::web;

/// Run the web API server
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Port to listen on (defaults to the configured port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to (defaults to the configured host)
    #[arg(long)]
    pub host: Option<String>,

    /// Catalog root directory or URL (overrides the config file)
    #[arg(long, value_name = "ROOT")]
    pub xml_root: Option<String>,
}

impl ServeArgs {
    /// Applies command-line overrides to a configuration.
    #[must_use]
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(root) = &self.xml_root {
            config.paths.xml_root.clone_from(root);
        }
        config
    }

    /// Execute the serve command
    pub async fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e}")))?;
        let config = self.apply(config);
        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid option: {e}")))?;

        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| CliError::validation(format!("Invalid listen address: {e}")))?;

        info!("Catalog root: {}", config.paths.xml_root);
        web::run_server(config, addr)
            .await
            .map_err(|e| CliError::io(format!("Server failed: {e:#}")))
    }
}
