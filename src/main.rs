//! Monument Designer - catalog tools and web API
//!
//! Loads product catalogs from the XML document tree, prints summaries of
//! what a product offers and runs the web API.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monument_designer::cli::{CliResult, InspectArgs, MaterialsArgs, SectionsArgs};
#[cfg(feature = "web")]
use monument_designer::cli::ServeArgs;
use monument_designer::constants::APP_BINARY_NAME;

/// Monument Designer - catalog tools and web API
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a product catalog and print a summary
    Inspect(InspectArgs),
    /// List the materials offered for a product
    Materials(MaterialsArgs),
    /// Render the designer sections a product offers
    Sections(SectionsArgs),
    /// Run the web API server
    #[cfg(feature = "web")]
    Serve(ServeArgs),
}

impl Command {
    async fn execute(&self) -> CliResult<()> {
        match self {
            Self::Inspect(args) => args.execute().await,
            Self::Materials(args) => args.execute().await,
            Self::Sections(args) => args.execute().await,
            #[cfg(feature = "web")]
            Self::Serve(args) => args.execute().await,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays clean
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.command.execute().await {
        eprintln!("Error: {e}");
        e.code.exit();
    }
}
