//! Monument Designer Web Server Binary
//!
//! This binary starts the web server that provides the REST API for the
//! designer front end.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from the config file (port 3001 by default)
//! monument-designer-web
//!
//! # Serve a local catalog tree on another port
//! monument-designer-web --port 8080 --xml-root ./public
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monument_designer::config::Config;
use monument_designer::web;

/// Monument Designer Web Server - REST API for the designer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (defaults to the configured port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (defaults to the configured host)
    #[arg(long)]
    host: Option<String>,

    /// Config file to read instead of the platform default:
    /// - Linux: ~/.config/MonumentDesigner/config.toml
    /// - macOS: ~/Library/Application Support/MonumentDesigner/config.toml
    /// - Windows: %APPDATA%\MonumentDesigner\config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog root directory or URL
    #[arg(long)]
    xml_root: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration, falling back to defaults
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(root) = args.xml_root {
        config.paths.xml_root = root;
    }
    config.validate()?;

    info!("Catalog root: {}", config.paths.xml_root);
    info!("Upload directory: {}", config.paths.upload_dir.display());

    // Build socket address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Start the server
    web::run_server(config, addr).await
}
