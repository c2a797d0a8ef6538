//! Service layer for catalog loading.
//!
//! This module contains the services that fetch catalog documents, resolve
//! additions and materials, coordinate the load cascade and price placed
//! items.

pub mod additions;
pub mod construct;
pub mod loader;
pub mod materials;
pub mod pricing;
pub mod source;
pub mod token;

// Re-export commonly used types
pub use additions::AdditionResolver;
pub use construct::ConstructService;
pub use loader::{CatalogLoader, LoadOptions};
pub use materials::MaterialResolver;
pub use pricing::{PriceFormula, PricingError, PricingService, QuantityType};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{source_for_root, CatalogSource, FsSource, MemorySource};
pub use token::{LoadToken, LoadTracker};
