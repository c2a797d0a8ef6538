//! Application-wide constants.
//!
//! This module defines the application name and the layout of the catalog
//! document tree served under the catalog root.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Monument Designer";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "monument-designer";

/// Country list, shared by all languages.
pub const COUNTRIES_DOCUMENT: &str = "data/xml/countries24.xml";

/// Addition-type catalogs are only published in this language.
pub const ADDITIONS_LANGUAGE: &str = "en_EN";

/// Only this country loads promo codes.
pub const PROMO_COUNTRY: &str = "au";

/// Language strings for a language code.
#[must_use]
pub fn language_document(code: &str) -> String {
    format!("data/xml/{code}/languages24.xml")
}

/// Promo codes for a language code.
#[must_use]
pub fn promo_codes_document(code: &str) -> String {
    format!("data/xml/{code}/promo-codes.xml")
}

/// Product catalog for a product id.
#[must_use]
pub fn product_document(product_id: &str) -> String {
    format!("data/xml/catalog-id-{product_id}.xml")
}

/// Addition-type catalog for a type key (`borders-bronze`, `images`, ...).
#[must_use]
pub fn addition_document(key: &str) -> String {
    format!("data/xml/{ADDITIONS_LANGUAGE}/{key}.xml")
}

/// Material family for a language code.
#[must_use]
pub fn material_document(code: &str, family: &str) -> String {
    format!("data/xml/{code}/{family}.xml")
}
