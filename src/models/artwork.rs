//! Motifs and emblems: catalog artwork placed on a monument.

use serde::{Deserialize, Serialize};

use crate::models::item::{
    Bounds, ItemCore, ItemError, ItemKind, ItemSize, ItemState, Placement, SizeLimits,
};
use crate::models::AdditionBuckets;

/// Snapshot of a motif or emblem for saved designs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkSnapshot {
    /// Item id on the monument
    #[serde(rename = "itemID")]
    pub item_id: u32,
    /// Catalog id of the artwork
    #[serde(rename = "productid")]
    pub product_id: String,
    /// Motif or emblem
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Artwork file
    pub src: String,
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Horizontal flip, `1` or `-1`
    pub flipx: i8,
    /// Vertical flip, `1` or `-1`
    pub flipy: i8,
    /// Rotation in degrees
    pub rotation: f64,
    /// Width to height ratio
    pub ratio: Option<f64>,
    /// Face the item sits on
    pub side: String,
    /// Monument part the item sits on
    pub part: String,
    /// Height in mm
    pub size: Option<f64>,
    /// Units ordered
    pub quantity: u32,
}

/// A motif or emblem with free, clamped sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    core: ItemCore,
    product_id: String,
    /// Artwork file reference from the catalog
    source: String,
    size: Option<f64>,
    limits: SizeLimits,
}

impl Artwork {
    /// Creates a motif sized from the first Motifs record.
    ///
    /// Motifs share one sizing record regardless of the chosen artwork; the
    /// initial height is pulled into range.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NoSizing`] when no motif record carries a
    /// dimension variant.
    pub fn motif(
        product_id: impl Into<String>,
        source: impl Into<String>,
        buckets: &AdditionBuckets,
        placement: Placement,
        item_id: u32,
    ) -> Result<Self, ItemError> {
        let product_id = product_id.into();
        let variant = buckets
            .motifs
            .first()
            .and_then(|record| record.types.first())
            .ok_or_else(|| ItemError::NoSizing {
                kind: ItemKind::Motif,
                product_id: product_id.clone(),
            })?;
        let mut limits = SizeLimits::from_variant(variant);
        limits.init_height = limits.clamp_height(limits.init_height);

        Ok(Self::with_limits(ItemKind::Motif, product_id, source.into(), limits, placement, item_id))
    }

    /// Creates an emblem sized from the Emblems record with its id.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NoSizing`] when no emblem record matches or it
    /// has no dimension variants.
    pub fn emblem(
        product_id: impl Into<String>,
        source: impl Into<String>,
        buckets: &AdditionBuckets,
        placement: Placement,
        item_id: u32,
    ) -> Result<Self, ItemError> {
        let product_id = product_id.into();
        let variant = buckets
            .emblems
            .iter()
            .rev()
            .find(|record| record.id == product_id)
            .and_then(|record| record.types.first())
            .ok_or_else(|| ItemError::NoSizing {
                kind: ItemKind::Emblem,
                product_id: product_id.clone(),
            })?;
        let limits = SizeLimits::from_variant(variant);

        Ok(Self::with_limits(ItemKind::Emblem, product_id, source.into(), limits, placement, item_id))
    }

    fn with_limits(
        kind: ItemKind,
        product_id: String,
        source: String,
        limits: SizeLimits,
        placement: Placement,
        item_id: u32,
    ) -> Self {
        Self {
            core: ItemCore::new(item_id, kind, placement, None),
            product_id,
            source,
            size: None,
            limits,
        }
    }

    /// Id on the monument.
    #[must_use]
    pub const fn item_id(&self) -> u32 {
        self.core.item_id
    }

    /// Catalog id of the motif or emblem artwork.
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Motif or emblem.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.core.kind
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ItemState {
        self.core.state
    }

    /// Height in mm, once sized.
    #[must_use]
    pub const fn size(&self) -> Option<f64> {
        self.size
    }

    /// Width to height ratio of the artwork file.
    #[must_use]
    pub const fn ratio(&self) -> Option<f64> {
        self.core.ratio
    }

    /// Size limits from the catalog record.
    #[must_use]
    pub const fn limits(&self) -> &SizeLimits {
        &self.limits
    }

    /// Where the item sits.
    #[must_use]
    pub const fn placement(&self) -> &Placement {
        &self.core.placement
    }

    pub(crate) const fn core(&self) -> &ItemCore {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }

    /// Records bitmap bounds and applies the current (or initial) height.
    ///
    /// # Errors
    ///
    /// Fails when the item was deleted.
    pub fn render(&mut self, bitmap: Bounds) -> Result<(), ItemError> {
        self.core.render(bitmap, self.limits.init_height)?;
        self.set_size(self.size.unwrap_or(self.limits.init_height))
    }

    /// Sets the height in millimetres, clamped to the sizing range.
    ///
    /// # Errors
    ///
    /// Fails when the item was deleted.
    pub fn set_size(&mut self, height: f64) -> Result<(), ItemError> {
        self.core.ensure_alive()?;
        let requested = if height.is_nan() { self.limits.init_height } else { height };
        let height = self.limits.clamp_height(requested);
        self.size = Some(height);
        if let Some(bounds) = self.core.bounds.filter(|bounds| bounds.height > 0.0) {
            self.core.ratio = Some(height / bounds.height);
        }
        Ok(())
    }

    /// Clones the artwork one outline width to the right.
    ///
    /// # Errors
    ///
    /// Fails when the source was deleted or never rendered.
    pub fn duplicate(&self, item_id: u32) -> Result<Self, ItemError> {
        let offset = self.core.duplicate_offset()?;
        Ok(Self {
            core: ItemCore::new(
                item_id,
                self.core.kind,
                self.core.placement.offset_x(offset),
                self.core.ratio,
            ),
            product_id: self.product_id.clone(),
            source: self.source.clone(),
            size: self.size,
            limits: self.limits,
        })
    }

    /// Snapshot for saved designs.
    #[must_use]
    pub fn serialize(&self) -> ArtworkSnapshot {
        let placement = &self.core.placement;
        ArtworkSnapshot {
            item_id: self.core.item_id,
            product_id: self.product_id.clone(),
            kind: self.core.kind,
            src: self.source.clone(),
            x: placement.x,
            y: placement.y,
            flipx: placement.flip_x,
            flipy: placement.flip_y,
            rotation: placement.rotation,
            ratio: self.core.ratio,
            side: placement.side.clone(),
            part: placement.part.clone(),
            size: self.size,
            quantity: 1,
        }
    }

    /// Current size as an [`ItemSize`].
    #[must_use]
    pub fn item_size(&self) -> Option<ItemSize> {
        self.size.map(ItemSize::Millimetres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdditionRecord, DimensionVariant};

    fn buckets() -> AdditionBuckets {
        let variant = DimensionVariant {
            min_height: Some(20.0),
            max_height: Some(300.0),
            init_height: Some(500.0),
            min_width: Some(20.0),
            max_width: Some(300.0),
            ..DimensionVariant::default()
        };
        let mut buckets = AdditionBuckets::default();
        for (id, record_type) in [("1", "motif"), ("77", "emblem")] {
            buckets.insert(AdditionRecord {
                id: id.to_string(),
                record_type: record_type.to_string(),
                types: vec![variant.clone()],
                ..AdditionRecord::default()
            });
        }
        buckets
    }

    #[test]
    fn test_motif_init_height_clamped() {
        let motif = Artwork::motif("dove", "motifs/dove.svg", &buckets(), Placement::default(), 1).unwrap();
        assert_eq!(motif.limits().init_height, 300.0);
        assert_eq!(motif.kind(), ItemKind::Motif);
    }

    #[test]
    fn test_emblem_requires_matching_record() {
        assert!(Artwork::emblem("77", "e.png", &buckets(), Placement::default(), 1).is_ok());
        let err = Artwork::emblem("78", "e.png", &buckets(), Placement::default(), 1).unwrap_err();
        assert!(matches!(err, ItemError::NoSizing { kind: ItemKind::Emblem, .. }));
    }

    #[test]
    fn test_render_and_clamp() {
        let mut motif = Artwork::motif("dove", "dove.svg", &buckets(), Placement::default(), 1).unwrap();
        motif.render(Bounds::new(100.0, 100.0)).unwrap();
        assert_eq!(motif.size(), Some(300.0));
        assert_eq!(motif.ratio(), Some(3.0));

        motif.set_size(5.0).unwrap();
        assert_eq!(motif.size(), Some(20.0));
    }

    #[test]
    fn test_duplicate_keeps_size() {
        let mut motif = Artwork::motif("dove", "dove.svg", &buckets(), Placement::default(), 1).unwrap();
        motif.render(Bounds::new(100.0, 50.0)).unwrap();
        motif.set_size(50.0).unwrap();

        let copy = motif.duplicate(2).unwrap();
        assert_eq!(copy.size(), Some(50.0));
        assert_eq!(copy.placement().x, 100.0);
        assert_eq!(copy.state(), ItemState::Constructed);
    }
}
