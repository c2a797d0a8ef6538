//! Product switching for a design session.

use tracing::debug;

use crate::context::DesignContext;
use crate::error::{CatalogError, Result};
use crate::models::Catalog;
use crate::services::{CatalogLoader, LoadOptions, LoadToken, LoadTracker};

/// A design context bound to a catalog loader.
///
/// Switching product starts a new load and cancels the one in flight; a
/// load whose token is no longer current is never installed.
#[derive(Debug)]
pub struct DesignSession {
    /// The design context loads are installed into
    pub ctx: DesignContext,
    loader: CatalogLoader,
    tracker: LoadTracker,
}

impl DesignSession {
    /// Binds a context to a loader.
    pub fn new(ctx: DesignContext, loader: CatalogLoader) -> Self {
        Self {
            ctx,
            loader,
            tracker: LoadTracker::new(),
        }
    }

    /// Load options for `product_id` under the session's settings.
    #[must_use]
    pub fn options(&self, product_id: &str, country: &str) -> LoadOptions {
        LoadOptions::new(product_id, self.ctx.settings.language.clone())
            .with_country(country)
            .with_mode(self.ctx.mode)
            .with_account_mode(self.ctx.account_mode)
    }

    /// Starts a product switch, cancelling any load still in flight.
    pub fn begin_switch(&self) -> LoadToken {
        self.tracker.begin()
    }

    /// Runs a load without touching the context.
    pub async fn fetch(&self, options: &LoadOptions, token: &LoadToken) -> Result<Catalog> {
        self.loader.load(options, token).await
    }

    /// Installs a loaded catalog if `token` is still the current load.
    ///
    /// Returns `false` when a newer switch superseded this one.
    pub fn install(&mut self, catalog: Catalog, token: &LoadToken) -> bool {
        if !self.tracker.is_current(token) {
            debug!(
                "Discarding catalog for product {} from superseded load {}",
                catalog.product_id,
                token.generation()
            );
            return false;
        }
        self.ctx.set_catalog(catalog);
        true
    }

    /// Loads `options` and installs the result.
    ///
    /// # Errors
    ///
    /// Returns the load error, or [`CatalogError::Cancelled`] when a newer
    /// switch started meanwhile.
    pub async fn switch_product(&mut self, options: &LoadOptions) -> Result<()> {
        let token = self.begin_switch();
        let catalog = self.fetch(options, &token).await?;
        if self.install(catalog, &token) {
            Ok(())
        } else {
            Err(CatalogError::Cancelled)
        }
    }
}
