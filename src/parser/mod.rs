//! Parsing of catalog XML documents.
//!
//! Each submodule reads one kind of document into the models. Parsers are
//! pure: they take the document text and never fetch anything themselves.

pub mod addition;
pub mod catalog;
pub mod locale;
pub mod material;
pub mod xml;

// Re-export commonly used functions
pub use addition::{parse_addition_record, ParsedAddition};
pub use catalog::{parse_product_catalog, ProductCatalog};
pub use locale::{parse_country, parse_language, parse_promo_codes};
pub use material::parse_materials;
