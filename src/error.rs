//! Error type for catalog loading and parsing.

use thiserror::Error;

/// Errors raised while fetching or parsing catalog documents.
///
/// Every variant that concerns a document names it, so a failed cascade can
/// be traced back to the file that stopped it.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A document could not be fetched from the source.
    #[error("failed to fetch {document}: {message}")]
    Fetch {
        /// Document path
        document: String,
        /// Underlying failure
        message: String,
    },

    /// A document is not well-formed XML.
    #[error("XML parse error in {document}: {source}")]
    Xml {
        /// Document path
        document: String,
        /// Parser error
        #[source]
        source: roxmltree::Error,
    },

    /// A required child element is absent.
    #[error("missing required element <{element}> in {document}")]
    MissingElement {
        /// Document path
        document: String,
        /// Element name
        element: &'static str,
    },

    /// A required attribute is absent.
    #[error("missing required attribute '{attr}' on element '{element}'")]
    MissingAttribute {
        /// Element carrying the attribute
        element: &'static str,
        /// Attribute name
        attr: &'static str,
    },

    /// An attribute does not parse as a number.
    #[error("invalid number '{value}' for attribute '{attr}' on element '{element}'")]
    InvalidNumber {
        /// Element carrying the attribute
        element: &'static str,
        /// Attribute name
        attr: &'static str,
        /// Raw attribute text
        value: String,
    },

    /// No country maps to the requested language.
    #[error("no country uses language '{0}'")]
    UnknownLanguage(String),

    /// The languages document has no entry for the code.
    #[error("language '{0}' not found")]
    LanguageNotFound(String),

    /// The catalog has no product with this id.
    #[error("product {0} not found in catalog")]
    ProductNotFound(String),

    /// The product names no material family.
    #[error("product {0} declares no material family")]
    NoMaterial(String),

    /// A newer load superseded this one.
    #[error("catalog load cancelled")]
    Cancelled,
}

impl CatalogError {
    /// Creates a fetch error for a document.
    pub fn fetch(document: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            document: document.into(),
            message: message.to_string(),
        }
    }

    /// True for cancellation, which callers usually do not report as a failure.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type of catalog loading.
pub type Result<T> = std::result::Result<T, CatalogError>;
