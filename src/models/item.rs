//! Shared pieces of placed design items (photos, motifs, emblems).
//!
//! Items follow a small lifecycle:
//!
//! ```text
//! Constructed -> Rendered -> Selected <-> Deselected -> Deleted
//! ```
//!
//! `Deleted` is terminal; every mutating operation on a deleted item fails
//! with [`ItemError::Deleted`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::models::DimensionVariant;

/// Errors raised by item lifecycle operations.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    /// No addition record (or dimension variant) carries sizing for the product
    #[error("no sizing data for {kind} product {product_id}")]
    NoSizing {
        /// Item kind being constructed
        kind: ItemKind,
        /// Catalog id of the item
        product_id: String,
    },
    /// Operation needs bitmap bounds but the item has not been rendered
    #[error("item {0} has not been rendered")]
    NotRendered(u32),
    /// Operation on a deleted item
    #[error("item {0} has been deleted")]
    Deleted(u32),
    /// Operation not allowed from the current state
    #[error("cannot {action} item {item_id} while {state}")]
    InvalidTransition {
        /// Item id
        item_id: u32,
        /// State the item was in
        state: ItemState,
        /// Attempted action
        action: &'static str,
    },
    /// No item with that id in the monument
    #[error("item {0} not found")]
    NotFound(u32),
}

/// Kind of placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Uploaded photo or ceramic image
    Photo,
    /// Carved motif
    Motif,
    /// Bronze emblem
    Emblem,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Photo => write!(f, "Photo"),
            Self::Motif => write!(f, "Motif"),
            Self::Emblem => write!(f, "Emblem"),
        }
    }
}

/// Lifecycle state of a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    /// Created, not yet drawn
    Constructed,
    /// Drawn with known bounds
    Rendered,
    /// The item being edited
    Selected,
    /// Drawn but not being edited
    Deselected,
    /// Removed from the monument
    Deleted,
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constructed => "constructed",
            Self::Rendered => "rendered",
            Self::Selected => "selected",
            Self::Deselected => "deselected",
            Self::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

/// Pixel size of the bitmap an item renders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Bounds {
    /// Bounds of a bitmap.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when wider than tall.
    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

/// Bitmap orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Wider than tall
    Landscape,
    /// Taller than wide
    Portrait,
    /// Sides within 10%
    Square,
}

impl Orientation {
    /// Sides within 10% of each other count as square.
    #[must_use]
    pub fn of(bounds: Bounds) -> Self {
        let (short, long) = if bounds.width < bounds.height {
            (bounds.width, bounds.height)
        } else {
            (bounds.height, bounds.width)
        };
        if long <= 0.0 || 1.0 - short / long < 0.1 {
            Self::Square
        } else if bounds.is_landscape() {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Sizing bounds read from an addition's dimension variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SizeLimits {
    /// Smallest width in mm
    pub min_width: f64,
    /// Largest width in mm
    pub max_width: f64,
    /// Starting width in mm
    pub init_width: f64,
    /// Smallest height in mm
    pub min_height: f64,
    /// Largest height in mm
    pub max_height: f64,
    /// Starting height in mm
    pub init_height: f64,
}

impl SizeLimits {
    /// Reads limits from a variant; missing numbers count as 0.
    #[must_use]
    pub fn from_variant(variant: &DimensionVariant) -> Self {
        Self {
            min_width: variant.min_width.unwrap_or_default(),
            max_width: variant.max_width.unwrap_or_default(),
            init_width: variant.init_width.unwrap_or_default(),
            min_height: variant.min_height.unwrap_or_default(),
            max_height: variant.max_height.unwrap_or_default(),
            init_height: variant.init_height.unwrap_or_default(),
        }
    }

    /// Fixed-size items pick from a discrete size list.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.min_width == self.max_width
    }

    /// Clamps a height into `[min_height, max_height]`.
    #[must_use]
    pub fn clamp_height(&self, height: f64) -> f64 {
        height.max(self.min_height).min(self.max_height)
    }
}

/// A size request coming from a slider or a select.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeInput {
    /// Slider value in millimetres
    Number(f64),
    /// Named size such as `"50 x 70 mm"`
    Text(String),
}

impl SizeInput {
    /// Interprets user text, numeric when it parses as a number.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Self::Number(number),
            _ => Self::Text(value.to_string()),
        }
    }
}

/// Current size of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemSize {
    /// Height in millimetres
    Millimetres(f64),
    /// Named discrete size, `"{width} x {height} mm"`
    Named(String),
}

impl fmt::Display for ItemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimetres(mm) => write!(f, "{mm}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Where an item sits on the monument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Horizontal flip, `1` or `-1`
    pub flip_x: i8,
    /// Vertical flip, `1` or `-1`
    pub flip_y: i8,
    /// Side of the part the item sits on ("front", "back")
    pub side: String,
    /// Owning part ("Headstone", "Base", ...)
    pub part: String,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            flip_x: 1,
            flip_y: 1,
            side: "front".to_string(),
            part: "Headstone".to_string(),
        }
    }
}

impl Placement {
    /// Placement shifted right by `dx`.
    #[must_use]
    pub fn offset_x(&self, dx: f64) -> Self {
        Self {
            x: self.x + dx,
            ..self.clone()
        }
    }

    /// True for rotations that swap the outline's visual width and height.
    #[must_use]
    pub fn is_quarter_turned(&self) -> bool {
        self.rotation == 90.0 || self.rotation == 180.0
    }
}

/// Lifecycle bookkeeping shared by every item kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCore {
    /// Id on the monument
    pub item_id: u32,
    /// What the item is
    pub kind: ItemKind,
    /// Lifecycle state
    pub state: ItemState,
    /// Where the item sits
    pub placement: Placement,
    /// Bitmap bounds, known once rendered
    pub bounds: Option<Bounds>,
    /// Scale from bitmap pixels to millimetres
    pub ratio: Option<f64>,
}

impl ItemCore {
    /// A freshly constructed item.
    #[must_use]
    pub fn new(item_id: u32, kind: ItemKind, placement: Placement, ratio: Option<f64>) -> Self {
        Self {
            item_id,
            kind,
            state: ItemState::Constructed,
            placement,
            bounds: None,
            ratio,
        }
    }

    /// Fails when the item was deleted.
    pub fn ensure_alive(&self) -> Result<(), ItemError> {
        if self.state == ItemState::Deleted {
            Err(ItemError::Deleted(self.item_id))
        } else {
            Ok(())
        }
    }

    /// Returns the rendered bitmap bounds.
    pub fn rendered_bounds(&self) -> Result<Bounds, ItemError> {
        self.ensure_alive()?;
        self.bounds.ok_or(ItemError::NotRendered(self.item_id))
    }

    /// Records bitmap bounds and moves to `Rendered`.
    ///
    /// Without an explicit ratio the item starts at its initial height.
    pub fn render(&mut self, bitmap: Bounds, init_height: f64) -> Result<(), ItemError> {
        self.ensure_alive()?;
        if self.ratio.is_none() && bitmap.height > 0.0 {
            self.ratio = Some(init_height / bitmap.height);
        }
        self.bounds = Some(bitmap);
        if self.state == ItemState::Constructed {
            self.state = ItemState::Rendered;
        }
        Ok(())
    }

    /// Makes the item the one being edited.
    pub fn select(&mut self) -> Result<(), ItemError> {
        self.ensure_selectable()?;
        self.state = ItemState::Selected;
        Ok(())
    }

    /// Fails unless the item has been rendered and is still alive.
    pub fn ensure_selectable(&self) -> Result<(), ItemError> {
        match self.state {
            ItemState::Rendered | ItemState::Deselected | ItemState::Selected => Ok(()),
            ItemState::Deleted => Err(ItemError::Deleted(self.item_id)),
            state => Err(ItemError::InvalidTransition {
                item_id: self.item_id,
                state,
                action: "select",
            }),
        }
    }

    /// Leaves a selected item drawn but idle.
    pub fn deselect(&mut self) -> Result<(), ItemError> {
        match self.state {
            ItemState::Selected => {
                self.state = ItemState::Deselected;
                Ok(())
            }
            ItemState::Deleted => Err(ItemError::Deleted(self.item_id)),
            state => Err(ItemError::InvalidTransition {
                item_id: self.item_id,
                state,
                action: "deselect",
            }),
        }
    }

    /// Marks the item deleted. Terminal.
    pub fn delete(&mut self) -> Result<(), ItemError> {
        self.ensure_alive()?;
        self.state = ItemState::Deleted;
        Ok(())
    }

    /// Displayed outline size in millimetres (bounds scaled by ratio).
    pub fn outline(&self) -> Result<Bounds, ItemError> {
        let bounds = self.rendered_bounds()?;
        let ratio = self.ratio.unwrap_or(1.0);
        Ok(Bounds::new(bounds.width * ratio, bounds.height * ratio))
    }

    /// Horizontal offset for a duplicate: one outline width, or one outline
    /// height when rotated a quarter or half turn.
    pub fn duplicate_offset(&self) -> Result<f64, ItemError> {
        let outline = self.outline()?;
        Ok(if self.placement.is_quarter_turned() {
            outline.height
        } else {
            outline.width
        })
    }

    /// Rotates the item.
    pub fn set_rotation(&mut self, degrees: f64) -> Result<(), ItemError> {
        self.ensure_alive()?;
        self.placement.rotation = degrees;
        Ok(())
    }

    /// Mirrors the item horizontally.
    pub fn flip_x(&mut self) -> Result<(), ItemError> {
        self.ensure_alive()?;
        self.placement.flip_x = -self.placement.flip_x;
        Ok(())
    }

    /// Mirrors the item vertically.
    pub fn flip_y(&mut self) -> Result<(), ItemError> {
        self.ensure_alive()?;
        self.placement.flip_y = -self.placement.flip_y;
        Ok(())
    }

    /// Moves the item.
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<(), ItemError> {
        self.ensure_alive()?;
        self.placement.x = x;
        self.placement.y = y;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> ItemCore {
        ItemCore::new(1, ItemKind::Motif, Placement::default(), None)
    }

    #[test]
    fn test_orientation() {
        assert_eq!(Orientation::of(Bounds::new(400.0, 300.0)), Orientation::Landscape);
        assert_eq!(Orientation::of(Bounds::new(300.0, 400.0)), Orientation::Portrait);
        assert_eq!(Orientation::of(Bounds::new(100.0, 95.0)), Orientation::Square);
        assert_eq!(Orientation::of(Bounds::new(200.0, 200.0)), Orientation::Square);
    }

    #[test]
    fn test_size_input_parse() {
        assert_eq!(SizeInput::parse("120"), SizeInput::Number(120.0));
        assert_eq!(
            SizeInput::parse("50 x 70 mm"),
            SizeInput::Text("50 x 70 mm".to_string())
        );
    }

    #[test]
    fn test_render_sets_initial_ratio() {
        let mut item = core();
        item.render(Bounds::new(200.0, 400.0), 100.0).unwrap();
        assert_eq!(item.state, ItemState::Rendered);
        assert_eq!(item.ratio, Some(0.25));
    }

    #[test]
    fn test_render_keeps_given_ratio() {
        let mut item = ItemCore::new(1, ItemKind::Motif, Placement::default(), Some(0.5));
        item.render(Bounds::new(200.0, 400.0), 100.0).unwrap();
        assert_eq!(item.ratio, Some(0.5));
    }

    #[test]
    fn test_select_requires_render() {
        let mut item = core();
        assert!(matches!(
            item.select(),
            Err(ItemError::InvalidTransition { action: "select", .. })
        ));

        item.render(Bounds::new(10.0, 10.0), 10.0).unwrap();
        item.select().unwrap();
        item.deselect().unwrap();
        item.select().unwrap();
        assert_eq!(item.state, ItemState::Selected);
    }

    #[test]
    fn test_deleted_is_terminal() {
        let mut item = core();
        item.delete().unwrap();
        assert_eq!(item.delete(), Err(ItemError::Deleted(1)));
        assert_eq!(item.move_to(1.0, 1.0), Err(ItemError::Deleted(1)));
        assert_eq!(
            item.render(Bounds::new(1.0, 1.0), 1.0),
            Err(ItemError::Deleted(1))
        );
    }

    #[test]
    fn test_duplicate_offset_uses_height_when_turned() {
        let mut item = ItemCore::new(1, ItemKind::Motif, Placement::default(), Some(0.5));
        item.render(Bounds::new(200.0, 100.0), 50.0).unwrap();
        assert_eq!(item.duplicate_offset().unwrap(), 100.0);

        item.set_rotation(90.0).unwrap();
        assert_eq!(item.duplicate_offset().unwrap(), 50.0);
    }

    #[test]
    fn test_flip_toggles_sign() {
        let mut item = core();
        item.flip_x().unwrap();
        assert_eq!(item.placement.flip_x, -1);
        item.flip_x().unwrap();
        assert_eq!(item.placement.flip_x, 1);
    }
}
