//! CLI command handlers for Monument Designer.
//!
//! This module provides headless, scriptable access to the catalog pipeline
//! and the web server.

pub mod common;
pub mod inspect;
pub mod materials;
pub mod sections;
#[cfg(feature = "web")]
pub mod serve;

// Re-export types used by main.rs and tests
pub use common::{CatalogArgs, CliError, CliResult, ExitCode};
pub use inspect::InspectArgs;
pub use materials::MaterialsArgs;
pub use sections::SectionsArgs;
#[cfg(feature = "web")]
pub use serve::ServeArgs;
