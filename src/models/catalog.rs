//! Product configuration and the aggregate result of a catalog load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Addition, AdditionBuckets, Material, PriceModelEntry, Section, Shape};

/// Attributes of the `<product>` node selected by a catalog load.
///
/// Numeric attributes (`color`, `fixed`, `border`, `laser`) are parsed;
/// everything else is kept as written. Replaced wholesale on product switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductConfig {
    /// Catalog id
    pub id: String,
    /// Product code
    pub code: Option<String>,
    /// Colour mode, `0` for monochrome
    pub color: Option<f64>,
    /// Hole options
    pub holes: Option<String>,
    /// Forced option flags
    pub force: Option<String>,
    /// Non-zero when the size is fixed
    pub fixed: Option<f64>,
    /// Granite list
    pub granites: Option<String>,
    /// Thickness options
    pub thickness: Option<String>,
    /// Non-zero when borders are offered
    pub border: Option<f64>,
    /// Background asset
    pub background: Option<String>,
    /// Monument model
    pub monument: Option<String>,
    /// Non-zero for laser-etched products
    pub laser: Option<f64>,
    /// Supplier flag
    pub biondan: Option<String>,
    /// Base price
    pub price: Option<String>,
    /// Price formula
    pub formula: Option<String>,
    /// Formula id
    pub formula_id: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Translation key
    pub translate: Option<String>,
    /// Default inscription size
    pub fontsize: Option<String>,
    /// Bitmap scale factor
    pub bitmap_factor: Option<String>,
    /// Default colour
    pub default_color: Option<String>,
    /// Material family name
    pub material: Option<String>,
    /// Material family id
    pub material_id: Option<String>,
    /// Product type attribute
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    /// Size step
    pub step: Option<String>,
    /// Size presets
    pub sizes: Option<String>,
    /// Retail multiplier
    pub retail: Option<String>,
    /// Forced retail price
    pub force_retail: Option<String>,
    /// Multiplier applied to the formula
    pub formula_multiplier: Option<String>,
    /// Marketing description
    pub description: Option<String>,
    /// Hint text
    pub hint: Option<String>,
}

impl ProductConfig {
    /// Product code ("Headstone", "Plaque", ...), empty when absent.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    /// Material formula ("Bronze", "Laser", ...), empty when absent.
    #[must_use]
    pub fn formula(&self) -> &str {
        self.formula.as_deref().unwrap_or_default()
    }

    /// Numeric product id, or 0 when the id is not a number.
    #[must_use]
    pub fn numeric_id(&self) -> u32 {
        self.id.trim().parse().unwrap_or(0)
    }

    /// Whether the product declares a border.
    #[must_use]
    pub fn has_border(&self) -> bool {
        self.border.is_some_and(|border| border != 0.0)
    }
}

/// The `<country>` entry matching the configured language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Country {
    /// Value of the `name` attribute
    pub name: String,
    /// Element name of every descendant mapped to its text
    pub entries: BTreeMap<String, String>,
}

impl Country {
    /// Returns the text of a descendant element.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Language code this country points at.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.get("language")
    }
}

/// The `<language>` entry selected by the country's language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Language {
    /// Language code (`en_EN`)
    pub code: String,
    /// Translated strings by element name
    pub entries: BTreeMap<String, String>,
}

impl Language {
    /// Returns a translated string by element name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

/// Promo code id to text, only loaded for Australia.
pub type PromoCodes = BTreeMap<String, String>;

/// Designer rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DesignMode {
    /// Flat canvas designer
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    /// 3D designer
    #[serde(rename = "3d")]
    ThreeD,
    /// Catalog browsing only; loads stop after the locale documents
    #[serde(rename = "web")]
    Web,
}

impl DesignMode {
    /// Mode name as used in config and URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoD => "2d",
            Self::ThreeD => "3d",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for DesignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DesignMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2d" => Ok(Self::TwoD),
            "3d" => Ok(Self::ThreeD),
            "web" => Ok(Self::Web),
            other => Err(format!("unknown design mode '{other}' (expected 2d, 3d or web)")),
        }
    }
}

/// Product family used to pick catalogs and views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    /// Bronze and granite plaques
    Plaques,
    /// Pet plaques
    Petplaques,
    /// Pet rocks
    Petrock,
    /// Full colour plaques
    Fullcolourplaque,
    /// Headstones
    Headstones,
    /// Mini headstones
    MiniHeadstones,
    /// Urns
    Urns,
    /// Standalone images
    Images,
}

impl ProductType {
    /// Family name used in asset paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plaques => "plaques",
            Self::Petplaques => "petplaques",
            Self::Petrock => "petrock",
            Self::Fullcolourplaque => "fullcolourplaque",
            Self::Headstones => "headstones",
            Self::MiniHeadstones => "mini-headstones",
            Self::Urns => "urns",
            Self::Images => "images",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the construct step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Construction {
    /// Product family, `None` for unknown codes
    pub product_type: Option<ProductType>,
    /// Whether the product sits on a base
    pub has_base: bool,
    /// Sections the designer offers for this product, in display order
    pub sections: Vec<Section>,
}

/// Everything one catalog load produces.
///
/// In `web` mode the load stops after the locale documents, so `product`
/// and `construction` stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    /// Id the load was for
    pub product_id: String,
    /// Country of the session
    pub country: Country,
    /// Language entry of the country
    pub language: Language,
    /// Promo codes, only for Australia
    pub promo_codes: Option<PromoCodes>,
    /// Product attributes; `None` in web mode
    pub product: Option<ProductConfig>,
    /// Additions in document order
    pub additions: Vec<Addition>,
    /// Resolved addition records
    pub buckets: AdditionBuckets,
    /// Shapes the product offers
    pub shapes: Vec<Shape>,
    /// Product price model
    pub price_model: Vec<PriceModelEntry>,
    /// Resolved materials
    pub materials: Vec<Material>,
    /// Construct outcome; `None` in web mode
    pub construction: Option<Construction>,
}

impl Catalog {
    /// Sections visible for the loaded product (empty before construct).
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        self.construction
            .as_ref()
            .map(|construction| construction.sections.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_config_accessors() {
        let config = ProductConfig {
            id: "31".to_string(),
            code: Some("Plaque".to_string()),
            border: Some(1.0),
            ..ProductConfig::default()
        };
        assert_eq!(config.code(), "Plaque");
        assert_eq!(config.formula(), "");
        assert_eq!(config.numeric_id(), 31);
        assert!(config.has_border());
    }

    #[test]
    fn test_zero_border_is_none() {
        let config = ProductConfig {
            border: Some(0.0),
            ..ProductConfig::default()
        };
        assert!(!config.has_border());
    }

    #[test]
    fn test_product_type_names() {
        assert_eq!(ProductType::MiniHeadstones.to_string(), "mini-headstones");
        assert_eq!(
            serde_json::to_string(&ProductType::Fullcolourplaque).unwrap(),
            "\"fullcolourplaque\""
        );
    }
}
