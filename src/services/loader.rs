//! The catalog configuration cascade.
//!
//! A load walks country → language → promo codes → product catalog →
//! addition types → materials → construct, one document at a time. Web
//! mode stops after the language. Any failure stops the cascade; nothing
//! after the failing step runs.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::constants::{
    language_document, product_document, promo_codes_document, COUNTRIES_DOCUMENT, PROMO_COUNTRY,
};
use crate::error::{CatalogError, Result};
use crate::models::{Catalog, DesignMode};
use crate::parser::{parse_country, parse_language, parse_product_catalog, parse_promo_codes};
use crate::services::additions::AdditionResolver;
use crate::services::construct::ConstructService;
use crate::services::materials::MaterialResolver;
use crate::services::source::CatalogSource;
use crate::services::token::LoadToken;

/// What to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Catalog id of the product
    pub product_id: String,
    /// Language code the country is looked up by (`en_EN`, `us_EN`, ...)
    pub language: String,
    /// Configured country; promo codes are only loaded for `au`
    pub country: String,
    /// Designer surface; `web` stops after the language
    pub mode: DesignMode,
    /// Account pages skip addition and material resolution
    pub account_mode: bool,
}

impl LoadOptions {
    /// Options for the default country and 2D mode.
    pub fn new(product_id: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            language: language.into(),
            country: PROMO_COUNTRY.to_string(),
            mode: DesignMode::default(),
            account_mode: false,
        }
    }

    /// Overrides the configured country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Sets the designer surface.
    #[must_use]
    pub const fn with_mode(mut self, mode: DesignMode) -> Self {
        self.mode = mode;
        self
    }

    /// Marks the load as coming from an account page.
    #[must_use]
    pub const fn with_account_mode(mut self, account_mode: bool) -> Self {
        self.account_mode = account_mode;
        self
    }
}

/// Runs catalog loads against a document source.
#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
}

impl CatalogLoader {
    /// A loader reading from `source`.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Runs the full cascade for `options`.
    ///
    /// Failures are logged with the failing document before being returned.
    /// Cancellation is returned without logging an error.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] of the cascade, or
    /// [`CatalogError::Cancelled`] once `token` is cancelled.
    pub async fn load(&self, options: &LoadOptions, token: &LoadToken) -> Result<Catalog> {
        match self.run(options, token).await {
            Ok(catalog) => {
                info!(
                    "Loaded catalog for product {} ({} additions, {} materials)",
                    options.product_id,
                    catalog.additions.len(),
                    catalog.materials.len()
                );
                Ok(catalog)
            }
            Err(e) if e.is_cancelled() => {
                debug!("Catalog load for product {} cancelled", options.product_id);
                Err(e)
            }
            Err(e) => {
                error!("Catalog load for product {} failed: {}", options.product_id, e);
                Err(e)
            }
        }
    }

    async fn run(&self, options: &LoadOptions, token: &LoadToken) -> Result<Catalog> {
        let source = self.source.as_ref();
        let mut catalog = Catalog {
            product_id: options.product_id.clone(),
            ..Catalog::default()
        };

        token.check()?;
        let text = source.fetch(COUNTRIES_DOCUMENT).await?;
        catalog.country = parse_country(COUNTRIES_DOCUMENT, &text, &options.language)?;

        token.check()?;
        let code = catalog
            .country
            .language()
            .map_or_else(|| options.language.clone(), str::to_string);
        let document = language_document(&code);
        let text = source.fetch(&document).await?;
        catalog.language = parse_language(&document, &text, &code)?;

        if options.mode == DesignMode::Web {
            token.check()?;
            return Ok(catalog);
        }

        if options.country.eq_ignore_ascii_case(PROMO_COUNTRY) {
            token.check()?;
            let document = promo_codes_document(&code);
            let text = source.fetch(&document).await?;
            catalog.promo_codes = Some(parse_promo_codes(&document, &text)?);
        }

        token.check()?;
        let document = product_document(&options.product_id);
        let text = source.fetch(&document).await?;
        let parsed = parse_product_catalog(&document, &text, &options.product_id)?;
        catalog.additions = parsed.additions;
        catalog.buckets.bases = parsed.bases;
        catalog.shapes = parsed.shapes;
        catalog.price_model = parsed.price_model;

        if options.account_mode {
            debug!("Account mode: skipping additions and materials");
        } else {
            AdditionResolver::new(source)
                .resolve(&catalog.additions, &mut catalog.buckets, token)
                .await?;

            token.check()?;
            catalog.materials = MaterialResolver::new(source)
                .resolve(&code, &parsed.product)
                .await?;
        }

        token.check()?;
        catalog.construction = Some(ConstructService::construct(&parsed.product));
        catalog.product = Some(parsed.product);
        Ok(catalog)
    }
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;
    use crate::services::source::MemorySource;
    use crate::services::token::LoadTracker;

    const COUNTRIES: &str = r#"<countries>
        <country name="Australia"><language>en_EN</language><currency>AUD</currency></country>
        <country name="United States"><language>us_EN</language><currency>USD</currency></country>
    </countries>"#;

    const CATALOG: &str = r#"<catalog>
        <product id="5" code="Plaque" name="Bronze Plaque" formula="Bronze" material="bronzes" border="1">
            <addition id="10" type="border" name="Border" formula="Bronze"/>
            <addition id="200" type="base" name="Base"/>
        </product>
        <product id="200" name="Granite Base" type="base"/>
    </catalog>"#;

    fn source() -> MemorySource {
        MemorySource::new()
            .with(COUNTRIES_DOCUMENT, COUNTRIES)
            .with(
                "data/xml/en_EN/languages24.xml",
                r#"<languages><language code="en_EN"><ok>OK</ok></language></languages>"#,
            )
            .with(
                "data/xml/us_EN/languages24.xml",
                r#"<languages><language code="us_EN"><ok>Okay</ok></language></languages>"#,
            )
            .with(
                "data/xml/en_EN/promo-codes.xml",
                r#"<promo><codes><code id="SPRING">10</code></codes></promo>"#,
            )
            .with("data/xml/catalog-id-5.xml", CATALOG)
            .with(
                "data/xml/en_EN/borders-bronze.xml",
                r#"<products><product id="10" name="Plain" type="border"><product_type><type id="1"/></product_type></product></products>"#,
            )
            .with(
                "data/xml/en_EN/bronzes.xml",
                r#"<materials path="data/jpg/bronzes/"><material id="1" name="Brown" m2="2"/></materials>"#,
            )
    }

    fn loader(source: MemorySource) -> CatalogLoader {
        CatalogLoader::new(Arc::new(source))
    }

    #[tokio::test]
    async fn test_full_cascade() {
        let catalog = loader(source())
            .load(&LoadOptions::new("5", "en_EN"), &LoadToken::new())
            .await
            .unwrap();

        assert_eq!(catalog.country.name, "Australia");
        assert_eq!(catalog.language.get("ok"), Some("OK"));
        assert_eq!(catalog.promo_codes.as_ref().unwrap().get("SPRING").map(String::as_str), Some("10"));
        assert_eq!(catalog.additions.len(), 2);
        assert_eq!(catalog.buckets.bases.len(), 1);
        assert_eq!(catalog.buckets.borders.len(), 1);
        assert_eq!(catalog.materials[0].m2, 2.0);
        assert!(catalog.sections().contains(&Section::Borders));
        assert!(catalog.sections().contains(&Section::FixingSystem));
    }

    #[tokio::test]
    async fn test_cascade_order() {
        let source = Arc::new(source());
        CatalogLoader::new(source.clone())
            .load(&LoadOptions::new("5", "en_EN"), &LoadToken::new())
            .await
            .unwrap();
        assert_eq!(
            source.fetched(),
            vec![
                COUNTRIES_DOCUMENT,
                "data/xml/en_EN/languages24.xml",
                "data/xml/en_EN/promo-codes.xml",
                "data/xml/catalog-id-5.xml",
                "data/xml/en_EN/borders-bronze.xml",
                "data/xml/en_EN/bronzes.xml",
            ]
        );
    }

    #[tokio::test]
    async fn test_promo_codes_only_for_au() {
        let catalog = loader(source())
            .load(
                &LoadOptions::new("5", "us_EN")
                    .with_country("us")
                    .with_mode(DesignMode::Web),
                &LoadToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(catalog.country.name, "United States");
        assert!(catalog.promo_codes.is_none());
        assert!(catalog.product.is_none());
        assert!(catalog.construction.is_none());
    }

    #[tokio::test]
    async fn test_web_mode_stops_after_language() {
        let source = Arc::new(
            MemorySource::new()
                .with(COUNTRIES_DOCUMENT, COUNTRIES)
                .with(
                    "data/xml/en_EN/languages24.xml",
                    r#"<languages><language code="en_EN"><ok>OK</ok></language></languages>"#,
                ),
        );
        let catalog = CatalogLoader::new(source.clone())
            .load(
                &LoadOptions::new("5", "en_EN").with_mode(DesignMode::Web),
                &LoadToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(catalog.country.name, "Australia");
        assert!(catalog.promo_codes.is_none());
        assert!(catalog.product.is_none());
        assert_eq!(
            source.fetched(),
            vec![COUNTRIES_DOCUMENT, "data/xml/en_EN/languages24.xml"]
        );
    }

    #[tokio::test]
    async fn test_account_mode_skips_resolution() {
        let source = Arc::new(source());
        let catalog = CatalogLoader::new(source.clone())
            .load(
                &LoadOptions::new("5", "en_EN").with_account_mode(true),
                &LoadToken::new(),
            )
            .await
            .unwrap();
        assert!(catalog.buckets.borders.is_empty());
        assert!(catalog.materials.is_empty());
        assert!(catalog.construction.is_some());
        assert_eq!(source.fetched().len(), 4);
    }

    #[tokio::test]
    async fn test_failure_stops_cascade() {
        let source = Arc::new(MemorySource::new().with(COUNTRIES_DOCUMENT, COUNTRIES));
        let err = CatalogLoader::new(source.clone())
            .load(&LoadOptions::new("5", "en_EN"), &LoadToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("languages24.xml"));
        assert!(matches!(err, CatalogError::Fetch { .. }));
        assert_eq!(source.fetched().len(), 2);
    }

    #[tokio::test]
    async fn test_switching_product_cancels_previous_load() {
        let tracker = LoadTracker::new();
        let stale = tracker.begin();
        let _fresh = tracker.begin();

        let err = loader(source())
            .load(&LoadOptions::new("5", "en_EN"), &stale)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
