//! Resolution of addition line items into bucketed records.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::constants::addition_document;
use crate::error::Result;
use crate::models::{Addition, AdditionBuckets};
use crate::parser::{parse_addition_record, ParsedAddition};
use crate::services::source::CatalogSource;
use crate::services::token::LoadToken;

/// Resolves additions against their addition-type catalogs.
///
/// Each type document is fetched at most once per resolver; a resolver lives
/// for one product load, so switching product starts with an empty cache.
pub struct AdditionResolver<'a> {
    source: &'a dyn CatalogSource,
    cache: HashMap<String, Arc<str>>,
}

impl<'a> AdditionResolver<'a> {
    /// A resolver with an empty document cache.
    pub fn new(source: &'a dyn CatalogSource) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Resolves `additions` last to first, appending records to `buckets`.
    ///
    /// Base-like additions were captured from the product catalog and are
    /// skipped, as are additions without a positive id or a type key.
    ///
    /// # Errors
    ///
    /// Stops at the first fetch or parse failure, or when `token` is
    /// cancelled.
    pub async fn resolve(
        &mut self,
        additions: &[Addition],
        buckets: &mut AdditionBuckets,
        token: &LoadToken,
    ) -> Result<()> {
        for addition in additions.iter().rev() {
            token.check()?;

            if addition.kind.is_base_like() {
                continue;
            }
            if addition.numeric_id().is_none() {
                debug!("Skipping {} addition with id '{}'", addition.kind, addition.id);
                continue;
            }
            let Some(key) = addition.catalog_key() else {
                debug!("Skipping {} addition '{}'", addition.kind, addition.name);
                continue;
            };

            let document = addition_document(&key);
            let text = self.document(&key, &document).await?;
            token.check()?;

            match parse_addition_record(&document, &text, &addition.id)? {
                Some(ParsedAddition::Inscription(record)) => buckets.inscriptions.push(record),
                Some(ParsedAddition::Record(record)) => {
                    let record_type = record.record_type.clone();
                    if !buckets.insert(record) {
                        debug!(
                            "Dropping addition {} from {}: no bucket for type '{}'",
                            addition.id, document, record_type
                        );
                    }
                }
                None => debug!("No record for addition {} in {}", addition.id, document),
            }
        }
        Ok(())
    }

    /// Cached text of a type document, fetching it on first use.
    async fn document(&mut self, key: &str, document: &str) -> Result<Arc<str>> {
        if let Some(text) = self.cache.get(key) {
            return Ok(Arc::clone(text));
        }
        debug!("Fetching addition catalog {}", document);
        let text: Arc<str> = self.source.fetch(document).await?.into();
        self.cache.insert(key.to_string(), Arc::clone(&text));
        Ok(text)
    }

    /// Type keys fetched so far.
    #[must_use]
    pub fn cached_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.cache.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdditionKind;
    use crate::services::source::MemorySource;

    fn addition(id: &str, kind: AdditionKind, name: &str, formula: &str) -> Addition {
        Addition {
            id: id.to_string(),
            kind,
            name: name.to_string(),
            formula: Some(formula.to_string()),
            note: None,
        }
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with(
                "data/xml/en_EN/borders-bronze.xml",
                r#"<products>
                    <product id="10" name="Plain" type="border"><product_type><type id="1"/></product_type></product>
                    <product id="11" name="Rope" type="border"><product_type><type id="1"/></product_type></product>
                </products>"#,
            )
            .with(
                "data/xml/en_EN/images.xml",
                r#"<products>
                    <product id="2300" name="Photo" type="image"><product_type><type id="1"/></product_type></product>
                    <product id="2301" name="Lamp" type="lamp"><product_type><type id="1"/></product_type></product>
                </products>"#,
            )
    }

    #[tokio::test]
    async fn test_resolve_fetches_each_key_once() {
        let source = source();
        let additions = vec![
            addition("10", AdditionKind::Border, "Border", "Bronze"),
            addition("11", AdditionKind::Border, "Border", "Bronze"),
            addition("2300", AdditionKind::Image, "Photo", ""),
        ];
        let mut buckets = AdditionBuckets::default();
        let mut resolver = AdditionResolver::new(&source);
        resolver
            .resolve(&additions, &mut buckets, &LoadToken::new())
            .await
            .unwrap();

        assert_eq!(buckets.borders.len(), 2);
        assert_eq!(buckets.images.len(), 1);
        // reverse order: images first, then borders once
        assert_eq!(
            source.fetched(),
            vec!["data/xml/en_EN/images.xml", "data/xml/en_EN/borders-bronze.xml"]
        );
        assert_eq!(resolver.cached_keys(), vec!["borders-bronze", "images"]);
        // last addition resolved first
        assert_eq!(buckets.borders[0].name.as_deref(), Some("Rope"));
    }

    #[tokio::test]
    async fn test_resolve_skips_base_like_and_zero_ids() {
        let source = source();
        let additions = vec![
            addition("200", AdditionKind::Base, "Base", ""),
            addition("0", AdditionKind::Image, "Photo", ""),
            addition("12", AdditionKind::Border, "Edge", "Bronze"),
        ];
        let mut buckets = AdditionBuckets::default();
        AdditionResolver::new(&source)
            .resolve(&additions, &mut buckets, &LoadToken::new())
            .await
            .unwrap();

        assert!(buckets.is_empty());
        assert!(source.fetched().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_drops_unbucketed_types() {
        let source = source();
        let additions = vec![addition("2301", AdditionKind::Image, "Lamp", "")];
        let mut buckets = AdditionBuckets::default();
        AdditionResolver::new(&source)
            .resolve(&additions, &mut buckets, &LoadToken::new())
            .await
            .unwrap();
        assert!(buckets.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_stops_when_cancelled() {
        let source = source();
        let additions = vec![addition("2300", AdditionKind::Image, "Photo", "")];
        let token = LoadToken::new();
        token.cancel();

        let mut buckets = AdditionBuckets::default();
        let err = AdditionResolver::new(&source)
            .resolve(&additions, &mut buckets, &token)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(source.fetched().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_fails_on_missing_document() {
        let source = MemorySource::new();
        let additions = vec![addition("5", AdditionKind::Emblem, "Emblem", "")];
        let mut buckets = AdditionBuckets::default();
        let err = AdditionResolver::new(&source)
            .resolve(&additions, &mut buckets, &LoadToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("data/xml/en_EN/emblems.xml"));
    }
}
