//! Addition line items and their resolved catalog records.
//!
//! An [`Addition`] is what the product catalog declares (`<addition>`); the
//! records in [`AdditionBuckets`] are what the addition-type catalogs resolve
//! it to. Records are created fresh on every product load and are read-only
//! afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::PriceTier;

/// Kind of purchasable accessory attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdditionKind {
    /// Drainage or fixing hole
    Hole,
    /// Flower pot
    Pot,
    /// Base under the headstone
    Base,
    /// Ledger slab
    Ledger,
    /// Kerb set around the grave
    Kerbset,
    /// Decorative border
    Border,
    /// Stand for plaques
    Stand,
    /// Inscription text
    Inscription,
    /// Photo or ceramic image
    Image,
    /// Bronze emblem
    Emblem,
    /// Size presets
    Sizes,
    /// Carved motif
    Motif,
}

impl AdditionKind {
    /// Parses the `type` attribute of an `<addition>` node.
    ///
    /// Returns `None` for types the designer does not handle.
    #[must_use]
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "hole" => Some(Self::Hole),
            "pot" => Some(Self::Pot),
            "base" => Some(Self::Base),
            "ledger" => Some(Self::Ledger),
            "kerbset" => Some(Self::Kerbset),
            "border" => Some(Self::Border),
            "stand" => Some(Self::Stand),
            "inscription" => Some(Self::Inscription),
            "image" => Some(Self::Image),
            "emblem" => Some(Self::Emblem),
            "sizes" => Some(Self::Sizes),
            "motif" => Some(Self::Motif),
            _ => None,
        }
    }

    /// Returns the catalog attribute value for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hole => "hole",
            Self::Pot => "pot",
            Self::Base => "base",
            Self::Ledger => "ledger",
            Self::Kerbset => "kerbset",
            Self::Border => "border",
            Self::Stand => "stand",
            Self::Inscription => "inscription",
            Self::Image => "image",
            Self::Emblem => "emblem",
            Self::Sizes => "sizes",
            Self::Motif => "motif",
        }
    }

    /// Base-like kinds are described inside the product catalog itself and
    /// never need an addition-type catalog fetch.
    #[must_use]
    pub const fn is_base_like(self) -> bool {
        matches!(
            self,
            Self::Hole | Self::Pot | Self::Base | Self::Ledger | Self::Kerbset
        )
    }
}

impl fmt::Display for AdditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `<addition>` declared by the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addition {
    /// Catalog id of the addition product
    pub id: String,
    /// Addition kind
    pub kind: AdditionKind,
    /// Display name ("Border", "Stand", "Motif", ...)
    pub name: String,
    /// Formula (material family such as "Bronze", "Laser")
    pub formula: Option<String>,
    /// Free-form note
    pub note: Option<String>,
}

impl Addition {
    /// Numeric id, if the catalog id is a positive integer.
    #[must_use]
    pub fn numeric_id(&self) -> Option<u32> {
        self.id.trim().parse::<u32>().ok().filter(|id| *id > 0)
    }

    /// Name of the addition-type catalog document holding this addition.
    ///
    /// Borders, stands and motifs are split by formula
    /// (`borders-bronze`, `stand-laser`, `motifs-engraved`); they only
    /// resolve when the addition carries the canonical name. Base-like kinds
    /// keep their own type and are resolved from the product catalog.
    #[must_use]
    pub fn catalog_key(&self) -> Option<String> {
        let formula = || self.formula.as_deref().unwrap_or_default().to_lowercase();
        let key = match self.kind {
            AdditionKind::Border if self.name == "Border" => format!("borders-{}", formula()),
            AdditionKind::Stand if self.name == "Stand" => format!("stand-{}", formula()),
            AdditionKind::Motif if self.name == "Motif" => format!("motifs-{}", formula()),
            AdditionKind::Border | AdditionKind::Stand | AdditionKind::Motif => return None,
            AdditionKind::Inscription => "inscriptions".to_string(),
            AdditionKind::Image => "images".to_string(),
            AdditionKind::Emblem => "emblems".to_string(),
            AdditionKind::Sizes => "sizes".to_string(),
            other => other.as_str().to_string(),
        };
        Some(key)
    }
}

/// A dimension variant (`<product_type><type>`) of an addition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DimensionVariant {
    /// Variant id
    pub id: Option<String>,
    /// Display number
    pub nr: Option<String>,
    /// Product code
    pub code: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Smallest width in mm
    pub min_width: Option<f64>,
    /// Largest width in mm
    pub max_width: Option<f64>,
    /// Smallest height in mm
    pub min_height: Option<f64>,
    /// Largest height in mm
    pub max_height: Option<f64>,
    /// Smallest depth in mm
    pub min_depth: Option<f64>,
    /// Largest depth in mm
    pub max_depth: Option<f64>,
    /// Starting width in mm
    pub init_width: Option<f64>,
    /// Starting height in mm
    pub init_height: Option<f64>,
    /// Starting depth in mm
    pub init_depth: Option<f64>,
    /// Availability flag as written in the catalog
    pub avail: Option<String>,
}

/// Resolved record for borders, stands, motifs, images, sizes and emblems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AdditionRecord {
    /// Catalog id
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Surface the record may be placed on
    pub surface: Option<String>,
    /// Whether placement is fixed
    pub fixed: Option<String>,
    /// The record's `type` attribute; decides its bucket
    #[serde(rename = "type")]
    pub record_type: String,
    /// Default colour
    pub color: Option<String>,
    /// Fixing attribute of the record's price model
    pub fixing: Option<String>,
    /// Dimension variants
    pub types: Vec<DimensionVariant>,
    /// Price tiers of the record's price model
    pub prices: Vec<PriceTier>,
}

/// A font available to inscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Font {
    /// Font id
    pub id: Option<String>,
    /// Display number
    pub nr: Option<String>,
    /// Font code
    pub code: Option<String>,
    /// Family name
    pub name: Option<String>,
    /// Font file, relative to `path`
    pub url: Option<String>,
    /// Base path declared on the enclosing `<shapes>` element
    pub path: Option<String>,
}

/// Resolved inscription record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InscriptionRecord {
    /// Catalog id
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Surface the inscription may be placed on
    pub surface: Option<String>,
    /// Whether placement is fixed
    pub fixed: Option<String>,
    /// The record's `type` attribute
    #[serde(rename = "type")]
    pub record_type: String,
    /// Colour list the inscription offers
    pub colours_id: Option<String>,
    /// Characters not charged for
    pub free_characters: Option<String>,
    /// Smallest letter height in mm
    pub min_height: Option<f64>,
    /// Largest letter height in mm
    pub max_height: Option<f64>,
    /// Starting width in mm
    pub init_width: Option<f64>,
    /// Starting letter height in mm
    pub init_height: Option<f64>,
    /// Preview asset
    pub url: Option<String>,
    /// Fonts offered
    pub fonts: Vec<Font>,
    /// Price tiers of the record's price model
    pub prices: Vec<PriceTier>,
}

/// Record for base-like additions, read from the product catalog itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BaseRecord {
    /// Catalog id
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// The record's `type` attribute
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    /// Price tiers
    pub prices: Vec<PriceTier>,
}

/// Named bucket of [`AdditionBuckets`] used by name lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Border records
    Borders,
    /// Stand records
    Stand,
    /// Motif records
    Motifs,
}

/// Resolved addition records grouped by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AdditionBuckets {
    /// Bases from the product catalog
    pub bases: Vec<BaseRecord>,
    /// Decorative borders
    pub borders: Vec<AdditionRecord>,
    /// Inscription records
    pub inscriptions: Vec<InscriptionRecord>,
    /// Motifs
    pub motifs: Vec<AdditionRecord>,
    /// Photo and ceramic images
    pub images: Vec<AdditionRecord>,
    /// Emblems
    pub emblems: Vec<AdditionRecord>,
    /// Size presets
    pub sizes: Vec<AdditionRecord>,
    /// Plaque stands
    pub stand: Vec<AdditionRecord>,
}

impl AdditionBuckets {
    /// Files a resolved record into the bucket matching its `type`.
    ///
    /// Returns `false` (and drops the record) for types without a bucket.
    pub fn insert(&mut self, record: AdditionRecord) -> bool {
        let bucket = match record.record_type.as_str() {
            "border" => &mut self.borders,
            "stand" => &mut self.stand,
            "motif" => &mut self.motifs,
            "image" => &mut self.images,
            "sizes" => &mut self.sizes,
            "emblem" => &mut self.emblems,
            _ => return false,
        };
        bucket.push(record);
        true
    }

    fn bucket(&self, bucket: Bucket) -> &[AdditionRecord] {
        match bucket {
            Bucket::Borders => &self.borders,
            Bucket::Stand => &self.stand,
            Bucket::Motifs => &self.motifs,
        }
    }

    /// Finds the image record for a photo product id.
    #[must_use]
    pub fn image(&self, product_id: &str) -> Option<&AdditionRecord> {
        self.images.iter().find(|image| image.id == product_id)
    }

    /// Looks up a record's display name by numeric id.
    ///
    /// Unknown ids fall back to the first record of the bucket; an empty
    /// bucket yields `None`.
    #[must_use]
    pub fn name_by_id(&self, bucket: Bucket, id: u32) -> Option<&str> {
        let records = self.bucket(bucket);
        records
            .iter()
            .rev()
            .find(|record| record.id.trim().parse::<u32>().ok() == Some(id))
            .or_else(|| records.first())
            .and_then(|record| record.name.as_deref())
    }

    /// Total number of resolved records across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
            + self.borders.len()
            + self.inscriptions.len()
            + self.motifs.len()
            + self.images.len()
            + self.emblems.len()
            + self.sizes.len()
            + self.stand.len()
    }

    /// Returns true if no records have been resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addition(kind: AdditionKind, name: &str, formula: &str) -> Addition {
        Addition {
            id: "12".to_string(),
            kind,
            name: name.to_string(),
            formula: Some(formula.to_string()),
            note: None,
        }
    }

    fn record(id: &str, name: &str, record_type: &str) -> AdditionRecord {
        AdditionRecord {
            id: id.to_string(),
            name: Some(name.to_string()),
            record_type: record_type.to_string(),
            ..AdditionRecord::default()
        }
    }

    #[test]
    fn test_catalog_key_by_formula() {
        assert_eq!(
            addition(AdditionKind::Border, "Border", "Bronze").catalog_key(),
            Some("borders-bronze".to_string())
        );
        assert_eq!(
            addition(AdditionKind::Stand, "Stand", "Laser").catalog_key(),
            Some("stand-laser".to_string())
        );
        assert_eq!(
            addition(AdditionKind::Motif, "Motif", "Engraved").catalog_key(),
            Some("motifs-engraved".to_string())
        );
    }

    #[test]
    fn test_catalog_key_requires_canonical_name() {
        assert_eq!(
            addition(AdditionKind::Border, "Decorative Edge", "Bronze").catalog_key(),
            None
        );
        assert_eq!(addition(AdditionKind::Motif, "Flower", "Bronze").catalog_key(), None);
    }

    #[test]
    fn test_catalog_key_plain_kinds() {
        assert_eq!(
            addition(AdditionKind::Image, "Photo", "").catalog_key(),
            Some("images".to_string())
        );
        assert_eq!(
            addition(AdditionKind::Pot, "Flower Pot", "").catalog_key(),
            Some("pot".to_string())
        );
    }

    #[test]
    fn test_numeric_id() {
        let mut add = addition(AdditionKind::Image, "Photo", "");
        assert_eq!(add.numeric_id(), Some(12));
        add.id = "0".to_string();
        assert_eq!(add.numeric_id(), None);
        add.id = "abc".to_string();
        assert_eq!(add.numeric_id(), None);
    }

    #[test]
    fn test_insert_routes_by_type() {
        let mut buckets = AdditionBuckets::default();
        assert!(buckets.insert(record("1", "Border A", "border")));
        assert!(buckets.insert(record("2", "Photo", "image")));
        assert!(!buckets.insert(record("3", "Mystery", "lamp")));

        assert_eq!(buckets.borders.len(), 1);
        assert_eq!(buckets.images.len(), 1);
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn test_name_by_id_with_fallback() {
        let mut buckets = AdditionBuckets::default();
        buckets.insert(record("5", "Plain", "border"));
        buckets.insert(record("7", "Rope", "border"));

        assert_eq!(buckets.name_by_id(Bucket::Borders, 7), Some("Rope"));
        assert_eq!(buckets.name_by_id(Bucket::Borders, 99), Some("Plain"));
        assert_eq!(buckets.name_by_id(Bucket::Stand, 1), None);
    }
}
