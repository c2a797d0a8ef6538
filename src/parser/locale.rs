//! Country, language and promo code documents.

use crate::error::{CatalogError, Result};
use crate::models::{Country, Language, PromoCodes};
use crate::parser::xml::{element_text, elements, first_element, parse_document, text_map};

/// Picks the `<country>` whose `<language>` text equals `language_code`.
///
/// When several countries match, the last one wins.
pub fn parse_country(document: &str, text: &str, language_code: &str) -> Result<Country> {
    let doc = parse_document(document, text)?;
    elements(doc.root_element(), "country")
        .filter(|country| {
            first_element(*country, "language").is_some_and(|lang| element_text(lang) == language_code)
        })
        .last()
        .map(|country| Country {
            name: country.attribute("name").unwrap_or_default().to_string(),
            entries: text_map(country),
        })
        .ok_or_else(|| CatalogError::UnknownLanguage(language_code.to_string()))
}

/// Picks the `<language code=…>` entry for a country's language.
pub fn parse_language(document: &str, text: &str, code: &str) -> Result<Language> {
    let doc = parse_document(document, text)?;
    elements(doc.root_element(), "language")
        .filter(|language| language.attribute("code") == Some(code))
        .last()
        .map(|language| Language {
            code: code.to_string(),
            entries: text_map(language),
        })
        .ok_or_else(|| CatalogError::LanguageNotFound(code.to_string()))
}

/// Reads promo codes: every element under `<codes>` maps its `id` to its text.
pub fn parse_promo_codes(document: &str, text: &str) -> Result<PromoCodes> {
    let doc = parse_document(document, text)?;
    let mut codes = PromoCodes::new();
    for group in elements(doc.root_element(), "codes") {
        for code in group.descendants().filter(|n| n.is_element() && *n != group) {
            if let Some(id) = code.attribute("id") {
                codes.insert(id.to_string(), element_text(code));
            }
        }
    }
    Ok(codes)
}
