//! Design session state.
//!
//! A [`DesignContext`] is everything one design session knows: user
//! settings, the loaded catalog, the monument being designed and which
//! section is open. It is passed explicitly to the code that needs it.

pub mod options;
pub mod sections;
pub mod session;

pub use options::{fixed_options, SectionOption};
pub use sections::{SectionController, SectionEntry, SectionView, Sections};
pub use session::DesignSession;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    Catalog, DesignItem, DesignMode, ItemError, Monument, ProductConfig, ProductType, Section,
};

/// User-facing settings of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Language code of the interface
    pub language: String,
    /// ISO currency code
    pub currency: String,
    /// Unit system label (`mm`, `inches`)
    pub metric: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "en_EN".to_string(),
            currency: "AUD".to_string(),
            metric: "mm".to_string(),
        }
    }
}

/// State of one design session.
#[derive(Debug, Clone, Default)]
pub struct DesignContext {
    /// User-facing settings
    pub settings: Settings,
    /// Designer surface the session runs in
    pub mode: DesignMode,
    /// Account pages show orders and saved designs only
    pub account_mode: bool,
    catalog: Option<Catalog>,
    monument: Monument,
    current_section: Option<Section>,
}

impl DesignContext {
    /// An empty context with no catalog loaded.
    #[must_use]
    pub fn new(settings: Settings, mode: DesignMode) -> Self {
        Self {
            settings,
            mode,
            ..Self::default()
        }
    }

    /// Marks the context as an account page.
    #[must_use]
    pub const fn with_account_mode(mut self, account_mode: bool) -> Self {
        self.account_mode = account_mode;
        self
    }

    /// Installs a freshly loaded catalog, replacing the previous product.
    ///
    /// Currency and metric follow the catalog's country when it names them.
    /// Placed items stay on the monument; the open section is closed.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        if let Some(currency) = catalog.country.get("currency") {
            self.settings.currency = currency.to_string();
        }
        if let Some(metric) = catalog.country.get("metric") {
            self.settings.metric = metric.to_string();
        }
        debug!("Switching to product {}", catalog.product_id);
        self.catalog = Some(catalog);
        self.current_section = None;
    }

    /// The loaded catalog, if any.
    #[must_use]
    pub const fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// Product configuration of the loaded catalog.
    #[must_use]
    pub fn product(&self) -> Option<&ProductConfig> {
        self.catalog.as_ref().and_then(|catalog| catalog.product.as_ref())
    }

    /// Construction family of the loaded product.
    #[must_use]
    pub fn product_type(&self) -> Option<ProductType> {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.construction.as_ref())
            .and_then(|construction| construction.product_type)
    }

    /// Sections offered for the loaded product; only products and settings
    /// before any catalog is loaded.
    #[must_use]
    pub fn visible_sections(&self) -> Vec<Section> {
        match &self.catalog {
            Some(catalog) if catalog.construction.is_some() => catalog.sections().to_vec(),
            _ => vec![Section::Products, Section::Settings],
        }
    }

    /// Items placed so far.
    #[must_use]
    pub const fn monument(&self) -> &Monument {
        &self.monument
    }

    /// Mutable access to the placed items.
    pub fn monument_mut(&mut self) -> &mut Monument {
        &mut self.monument
    }

    /// Places an item on the monument.
    pub fn place(&mut self, item: DesignItem) {
        self.monument.add(item);
    }

    /// Selects an item; the previous selection is deselected.
    ///
    /// # Errors
    ///
    /// Fails for unknown ids and items that were never rendered.
    pub fn select(&mut self, item_id: u32) -> Result<(), ItemError> {
        self.monument.select(item_id)
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.monument.deselect_all();
    }

    /// Id of the selected item.
    #[must_use]
    pub fn selection(&self) -> Option<u32> {
        self.monument.selected()
    }

    /// Removes an item from the monument.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NotFound`] for unknown ids.
    pub fn delete(&mut self, item_id: u32) -> Result<DesignItem, ItemError> {
        self.monument.remove(item_id)
    }

    /// Duplicates the selected item, returning the copy's id.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NotFound`] when nothing is selected.
    pub fn duplicate_selected(&mut self) -> Result<u32, ItemError> {
        let item_id = self.selection().ok_or(ItemError::NotFound(0))?;
        self.monument.duplicate(item_id)
    }

    /// Section the user is on.
    #[must_use]
    pub const fn current_section(&self) -> Option<Section> {
        self.current_section
    }

    pub(crate) fn set_current_section(&mut self, section: Option<Section>) {
        self.current_section = section;
    }
}
