//! Uploaded photos placed on a monument.
//!
//! A photo is sized from the Images addition record matching its product id.
//! When the first dimension variant has equal min and max width the photo is
//! *fixed*: it picks from a discrete list of named sizes. Otherwise it is
//! *free* and its height is clamped to the variant's range.

use serde::{Deserialize, Serialize};

use crate::models::item::{
    Bounds, ItemCore, ItemError, ItemKind, ItemSize, ItemState, Orientation, Placement,
    SizeInput, SizeLimits,
};
use crate::models::{AdditionBuckets, DimensionVariant};

/// Height used when a free photo receives a non-numeric size.
const DEFAULT_FREE_SIZE: f64 = 100.0;

/// Product whose rectangle masks cannot use the two smallest sizes.
const CERAMIC_PRODUCT_ID: u32 = 2400;
/// Product whose rectangle and square masks cannot use the largest size.
const VITREOUS_PRODUCT_ID: u32 = 2300;

/// Clip shape applied to a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mask {
    /// Upright oval
    #[default]
    PortraitOval,
    /// Upright rectangle
    PortraitRectangle,
    /// Wide oval
    LandscapeOval,
    /// Wide rectangle
    LandscapeRectangle,
    /// Square
    Square,
}

impl Mask {
    /// Numeric code used in saved designs.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::PortraitOval => 0,
            Self::PortraitRectangle => 1,
            Self::LandscapeOval => 2,
            Self::LandscapeRectangle => 3,
            Self::Square => 4,
        }
    }

    /// Mask for a saved-design code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::PortraitOval),
            1 => Some(Self::PortraitRectangle),
            2 => Some(Self::LandscapeOval),
            3 => Some(Self::LandscapeRectangle),
            4 => Some(Self::Square),
            _ => None,
        }
    }

    /// Either oval orientation.
    #[must_use]
    pub const fn is_oval(self) -> bool {
        matches!(self, Self::PortraitOval | Self::LandscapeOval)
    }

    /// Either rectangle orientation.
    #[must_use]
    pub const fn is_rectangle(self) -> bool {
        matches!(self, Self::PortraitRectangle | Self::LandscapeRectangle)
    }

    /// Keeps the oval/rectangle family and picks the orientation from the
    /// bitmap. The square mask is returned unchanged.
    #[must_use]
    pub fn oriented(self, bounds: Bounds) -> Self {
        let landscape = bounds.is_landscape();
        match (self.is_oval(), self.is_rectangle(), landscape) {
            (true, _, true) => Self::LandscapeOval,
            (true, _, false) => Self::PortraitOval,
            (_, true, true) => Self::LandscapeRectangle,
            (_, true, false) => Self::PortraitRectangle,
            _ => self,
        }
    }
}

/// Colour treatment applied to a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorFilter {
    /// Unchanged colours
    #[default]
    Full,
    /// Greyscale
    Grey,
    /// Sepia tone
    Sepia,
}

impl ColorFilter {
    /// Numeric code used in saved designs.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Full => 0,
            Self::Grey => 1,
            Self::Sepia => 2,
        }
    }

    /// Filter for a saved-design code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Full),
            1 => Some(Self::Grey),
            2 => Some(Self::Sepia),
            _ => None,
        }
    }

    /// 4x5 RGBA colour matrix (rows R, G, B, A; last column is the offset).
    #[must_use]
    pub const fn matrix(self) -> [[f64; 5]; 4] {
        match self {
            Self::Full => [
                [1.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
            Self::Grey => [
                [0.30, 0.30, 0.30, 0.0, 0.0],
                [0.30, 0.30, 0.30, 0.0, 0.0],
                [0.30, 0.30, 0.30, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
            Self::Sepia => [
                [0.39, 0.77, 0.19, 0.0, 0.0],
                [0.35, 0.68, 0.17, 0.0, 0.0],
                [0.27, 0.53, 0.13, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
        }
    }
}

/// One entry of the discrete photo size list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSize {
    /// Variant id minus one
    pub id: i64,
    /// `"{min_width} x {min_height} mm"`
    pub name: String,
    /// Smallest width in mm
    pub min_width: f64,
    /// Smallest height in mm
    pub min_height: f64,
    /// Largest width in mm
    pub max_width: f64,
    /// Largest height in mm
    pub max_height: f64,
    /// Starting width in mm
    pub init_width: f64,
    /// Starting height in mm
    pub init_height: f64,
}

impl PhotoSize {
    fn from_variant(variant: &DimensionVariant) -> Self {
        let limits = SizeLimits::from_variant(variant);
        let id = variant
            .id
            .as_deref()
            .and_then(|id| id.trim().parse::<i64>().ok())
            .unwrap_or_default();
        Self {
            id: id - 1,
            name: format!("{} x {} mm", limits.min_width, limits.min_height),
            min_width: limits.min_width,
            min_height: limits.min_height,
            max_width: limits.max_width,
            max_height: limits.max_height,
            init_width: limits.init_width,
            init_height: limits.init_height,
        }
    }
}

/// Constructor data for a photo.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoArgs {
    /// Catalog id of the image product
    pub product_id: u32,
    /// Display name
    pub name: Option<String>,
    /// Upload reference (`{uniqueid}/{filename}`)
    pub source: Option<String>,
    /// Masked image file name returned by the upload endpoint
    pub item: Option<String>,
    /// Clip shape
    pub mask: Mask,
    /// Colour treatment
    pub color: ColorFilter,
    /// Chosen size, if any
    pub size: Option<ItemSize>,
    /// Scale from bitmap pixels to millimetres
    pub ratio: Option<f64>,
    /// Where the photo sits
    pub placement: Placement,
}

impl PhotoArgs {
    /// Arguments with default mask, colour and placement.
    #[must_use]
    pub fn new(product_id: u32) -> Self {
        Self {
            product_id,
            name: None,
            source: None,
            item: None,
            mask: Mask::default(),
            color: ColorFilter::default(),
            size: None,
            ratio: None,
            placement: Placement::default(),
        }
    }

    /// Sets the upload reference.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the masked image file.
    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Sets the clip shape.
    #[must_use]
    pub const fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = mask;
        self
    }

    /// Sets the colour treatment.
    #[must_use]
    pub const fn with_color(mut self, color: ColorFilter) -> Self {
        self.color = color;
        self
    }

    /// Sets the starting size.
    #[must_use]
    pub fn with_size(mut self, size: ItemSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets an explicit scale.
    #[must_use]
    pub const fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Sets where the photo sits.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

/// Saved-design snapshot of a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSnapshot {
    /// Item id on the monument
    #[serde(rename = "itemID")]
    pub item_id: u32,
    /// Catalog id of the image product
    #[serde(rename = "productid")]
    pub product_id: u32,
    /// Display name
    pub name: Option<String>,
    /// Always `Photo`
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Upload reference
    pub src: Option<String>,
    /// Masked image file
    pub item: Option<String>,
    /// Colour filter code
    pub color: u8,
    /// Mask code
    pub mask: u8,
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
    /// Scale from bitmap pixels to millimetres
    pub ratio: Option<f64>,
    /// Face the item sits on
    pub side: String,
    /// Monument part the item sits on
    pub part: String,
    /// Size name from the size list
    pub size: Option<String>,
    /// Millimetres, free photos only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Millimetres, free photos only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Units ordered
    pub quantity: u32,
}

/// A photo placed on the monument.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    core: ItemCore,
    product_id: u32,
    name: Option<String>,
    source: Option<String>,
    item: Option<String>,
    mask: Mask,
    color: ColorFilter,
    size: Option<ItemSize>,
    limits: SizeLimits,
    variants: Vec<DimensionVariant>,
    orientation: Option<Orientation>,
}

impl Photo {
    /// Configures a photo from the Images record matching its product id.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NoSizing`] when no Images record matches or the
    /// record has no dimension variants.
    pub fn new(args: PhotoArgs, buckets: &AdditionBuckets, item_id: u32) -> Result<Self, ItemError> {
        let no_sizing = || ItemError::NoSizing {
            kind: ItemKind::Photo,
            product_id: args.product_id.to_string(),
        };
        let record = buckets
            .images
            .iter()
            .rev()
            .find(|image| image.id.trim().parse::<u32>().ok() == Some(args.product_id))
            .ok_or_else(no_sizing)?;
        let first = record.types.first().ok_or_else(no_sizing)?;

        Ok(Self {
            core: ItemCore::new(item_id, ItemKind::Photo, args.placement, args.ratio),
            product_id: args.product_id,
            name: args.name,
            source: args.source,
            item: args.item,
            mask: args.mask,
            color: args.color,
            size: args.size,
            limits: SizeLimits::from_variant(first),
            variants: record.types.clone(),
            orientation: None,
        })
    }

    /// Id on the monument.
    #[must_use]
    pub const fn item_id(&self) -> u32 {
        self.core.item_id
    }

    /// Catalog id of the image product.
    #[must_use]
    pub const fn product_id(&self) -> u32 {
        self.product_id
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ItemState {
        self.core.state
    }

    /// Clip shape.
    #[must_use]
    pub const fn mask(&self) -> Mask {
        self.mask
    }

    /// Colour treatment.
    #[must_use]
    pub const fn color(&self) -> ColorFilter {
        self.color
    }

    /// Scale from bitmap pixels to millimetres.
    #[must_use]
    pub const fn ratio(&self) -> Option<f64> {
        self.core.ratio
    }

    /// Chosen size.
    #[must_use]
    pub fn size(&self) -> Option<&ItemSize> {
        self.size.as_ref()
    }

    /// Where the photo sits.
    #[must_use]
    pub const fn placement(&self) -> &Placement {
        &self.core.placement
    }

    /// Orientation of the rendered bitmap.
    #[must_use]
    pub const fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Size limits from the catalog record.
    #[must_use]
    pub const fn limits(&self) -> &SizeLimits {
        &self.limits
    }

    /// Whether the photo picks from discrete sizes.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.limits.is_fixed()
    }

    pub(crate) const fn core(&self) -> &ItemCore {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }

    /// Discrete sizes available for the current product and mask.
    #[must_use]
    pub fn photo_sizes(&self) -> Vec<PhotoSize> {
        let mut sizes: Vec<PhotoSize> = self.variants.iter().map(PhotoSize::from_variant).collect();
        match self.product_id {
            CERAMIC_PRODUCT_ID if self.mask.is_rectangle() => {
                sizes.drain(..sizes.len().min(2));
            }
            VITREOUS_PRODUCT_ID if self.mask.is_rectangle() || self.mask == Mask::Square => {
                sizes.pop();
            }
            _ => {}
        }
        sizes
    }

    /// One-based position of the current size in [`Self::photo_sizes`].
    #[must_use]
    pub fn photo_size_id(&self) -> Option<usize> {
        let ItemSize::Named(current) = self.size.as_ref()? else {
            return None;
        };
        self.photo_sizes()
            .iter()
            .rposition(|size| &size.name == current)
            .map(|index| index + 1)
    }

    /// Places the bitmap: records bounds and orientation, then applies
    /// mask and size.
    ///
    /// # Errors
    ///
    /// Fails when the photo was deleted.
    pub fn render(&mut self, bitmap: Bounds) -> Result<(), ItemError> {
        self.core.render(bitmap, self.limits.init_height)?;
        self.orientation = Some(Orientation::of(bitmap));

        let size = match self.size.clone() {
            Some(ItemSize::Named(name)) => SizeInput::Text(name),
            Some(ItemSize::Millimetres(mm)) => SizeInput::Number(mm),
            None if self.is_fixed() => match self.photo_sizes().first() {
                Some(first) => SizeInput::Text(first.name.clone()),
                None => SizeInput::Number(self.limits.init_height),
            },
            None => SizeInput::Number(self.limits.init_height),
        };
        self.set_size(size)
    }

    /// Changes the photo's size.
    ///
    /// Fixed photos take a named size verbatim, or snap a number to the last
    /// size whose minimum width lies below it. Free photos clamp to the
    /// height range; text that is not a number becomes 100 first.
    ///
    /// # Errors
    ///
    /// Fails when the photo was deleted.
    pub fn set_size(&mut self, input: SizeInput) -> Result<(), ItemError> {
        self.core.ensure_alive()?;

        if self.is_fixed() {
            match input {
                SizeInput::Text(name) => self.size = Some(ItemSize::Named(name)),
                SizeInput::Number(value) => {
                    if let Some(size) = self
                        .photo_sizes()
                        .into_iter()
                        .rev()
                        .find(|size| value > size.min_width)
                    {
                        self.size = Some(ItemSize::Named(size.name));
                    }
                }
            }
            if let (Some(bounds), Some(width), Some(height)) =
                (self.core.bounds, self.width_mm(), self.height_mm())
            {
                if bounds.height > 0.0 {
                    let mm = if bounds.is_landscape() { width } else { height };
                    self.core.ratio = Some(mm / bounds.height);
                }
            }
        } else {
            let requested = match input {
                SizeInput::Number(value) if !value.is_nan() => value,
                _ => DEFAULT_FREE_SIZE,
            };
            let height = self.limits.clamp_height(requested);
            self.size = Some(ItemSize::Millimetres(height));
            if let Some(bounds) = self.core.bounds.filter(|bounds| bounds.height > 0.0) {
                self.core.ratio = Some(height / bounds.height);
            }
        }

        if self.core.bounds.is_some() {
            self.apply_mask(self.mask)?;
        }
        Ok(())
    }

    /// Applies a mask, re-orienting ovals and rectangles to the bitmap.
    ///
    /// # Errors
    ///
    /// Fails when the photo was deleted.
    pub fn apply_mask(&mut self, mask: Mask) -> Result<(), ItemError> {
        self.core.ensure_alive()?;
        self.mask = match self.core.bounds {
            Some(bounds) => mask.oriented(bounds),
            None => mask,
        };
        Ok(())
    }

    /// Sets the colour filter.
    ///
    /// # Errors
    ///
    /// Fails when the photo was deleted.
    pub fn apply_color(&mut self, color: ColorFilter) -> Result<(), ItemError> {
        self.core.ensure_alive()?;
        self.color = color;
        Ok(())
    }

    /// Width in millimetres.
    ///
    /// Fixed photos read it from the named size; free photos scale the
    /// height by the bitmap's aspect ratio.
    #[must_use]
    pub fn width_mm(&self) -> Option<f64> {
        match self.size.as_ref()? {
            ItemSize::Named(name) if self.is_fixed() => parse_named_size(name).map(|(w, _)| w),
            ItemSize::Millimetres(mm) => {
                let bounds = self.core.bounds.filter(|bounds| bounds.height > 0.0)?;
                Some((mm * bounds.width / bounds.height).round())
            }
            ItemSize::Named(_) => None,
        }
    }

    /// Height in millimetres.
    #[must_use]
    pub fn height_mm(&self) -> Option<f64> {
        match self.size.as_ref()? {
            ItemSize::Named(name) if self.is_fixed() => parse_named_size(name).map(|(_, h)| h),
            ItemSize::Millimetres(_) => {
                let bounds = self.core.bounds?;
                Some((bounds.height * self.core.ratio?).round())
            }
            ItemSize::Named(_) => None,
        }
    }

    /// Clones the constructor data into a new photo one outline width to
    /// the right. The clone starts `Constructed` under `item_id`.
    ///
    /// # Errors
    ///
    /// Fails when the source was deleted or never rendered.
    pub fn duplicate(&self, item_id: u32) -> Result<Self, ItemError> {
        let offset = self.core.duplicate_offset()?;
        Ok(Self {
            core: ItemCore::new(
                item_id,
                ItemKind::Photo,
                self.core.placement.offset_x(offset),
                self.core.ratio,
            ),
            product_id: self.product_id,
            name: self.name.clone(),
            source: self.source.clone(),
            item: self.item.clone(),
            mask: self.mask,
            color: self.color,
            size: self.size.clone(),
            limits: self.limits,
            variants: self.variants.clone(),
            orientation: None,
        })
    }

    /// Snapshot for saved designs and quotes.
    #[must_use]
    pub fn serialize(&self) -> PhotoSnapshot {
        let placement = &self.core.placement;
        let (width, height) = match (self.is_fixed(), self.core.bounds, self.core.ratio) {
            (false, Some(bounds), Some(ratio)) => (
                Some((bounds.width * ratio).round()),
                Some((bounds.height * ratio).round()),
            ),
            _ => (None, None),
        };

        PhotoSnapshot {
            item_id: self.core.item_id,
            product_id: self.product_id,
            name: self.name.clone(),
            kind: ItemKind::Photo,
            src: self.source.clone(),
            item: self.item.clone(),
            color: self.color.code(),
            mask: self.mask.code(),
            x: placement.x,
            y: placement.y,
            flipx: placement.flip_x,
            flipy: placement.flip_y,
            rotation: placement.rotation,
            ratio: self.core.ratio,
            side: placement.side.clone(),
            part: placement.part.clone(),
            size: self.size.as_ref().map(ToString::to_string),
            width,
            height,
            quantity: 1,
        }
    }
}

/// Parses `"{width} x {height} mm"`.
fn parse_named_size(name: &str) -> Option<(f64, f64)> {
    let (width, height) = name.split_once(" x ")?;
    let height = height.trim().trim_end_matches("mm").trim();
    Some((width.trim().parse().ok()?, height.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdditionRecord;

    fn variant(id: &str, min_w: f64, max_w: f64, min_h: f64, max_h: f64) -> DimensionVariant {
        DimensionVariant {
            id: Some(id.to_string()),
            min_width: Some(min_w),
            max_width: Some(max_w),
            min_height: Some(min_h),
            max_height: Some(max_h),
            init_width: Some(min_w),
            init_height: Some(min_h),
            ..DimensionVariant::default()
        }
    }

    fn buckets(product_id: &str, types: Vec<DimensionVariant>) -> AdditionBuckets {
        let mut buckets = AdditionBuckets::default();
        buckets.insert(AdditionRecord {
            id: product_id.to_string(),
            name: Some("Photo".to_string()),
            record_type: "image".to_string(),
            types,
            ..AdditionRecord::default()
        });
        buckets
    }

    fn fixed_buckets(product_id: &str) -> AdditionBuckets {
        buckets(
            product_id,
            vec![
                variant("1", 40.0, 40.0, 50.0, 50.0),
                variant("2", 50.0, 50.0, 70.0, 70.0),
                variant("3", 60.0, 60.0, 80.0, 80.0),
                variant("4", 80.0, 80.0, 100.0, 100.0),
            ],
        )
    }

    fn free_photo() -> Photo {
        let buckets = buckets("2500", vec![variant("1", 30.0, 300.0, 40.0, 400.0)]);
        Photo::new(PhotoArgs::new(2500), &buckets, 1).unwrap()
    }

    #[test]
    fn test_missing_image_record_is_error() {
        let err = Photo::new(PhotoArgs::new(77), &AdditionBuckets::default(), 1).unwrap_err();
        assert!(matches!(err, ItemError::NoSizing { .. }));
    }

    #[test]
    fn test_fixed_when_min_equals_max_width() {
        let photo = Photo::new(PhotoArgs::new(2100), &fixed_buckets("2100"), 1).unwrap();
        assert!(photo.is_fixed());
        assert!(!free_photo().is_fixed());
    }

    #[test]
    fn test_photo_sizes_names_and_ids() {
        let photo = Photo::new(PhotoArgs::new(2100), &fixed_buckets("2100"), 1).unwrap();
        let sizes = photo.photo_sizes();
        assert_eq!(sizes.len(), 4);
        assert_eq!(sizes[0].id, 0);
        assert_eq!(sizes[0].name, "40 x 50 mm");
        assert_eq!(sizes[3].name, "80 x 100 mm");
    }

    #[test]
    fn test_photo_sizes_product_rules() {
        let rect = PhotoArgs::new(2400).with_mask(Mask::PortraitRectangle);
        let photo = Photo::new(rect, &fixed_buckets("2400"), 1).unwrap();
        assert_eq!(photo.photo_sizes()[0].name, "60 x 80 mm");

        let oval = PhotoArgs::new(2400).with_mask(Mask::PortraitOval);
        let photo = Photo::new(oval, &fixed_buckets("2400"), 1).unwrap();
        assert_eq!(photo.photo_sizes().len(), 4);

        let square = PhotoArgs::new(2300).with_mask(Mask::Square);
        let photo = Photo::new(square, &fixed_buckets("2300"), 1).unwrap();
        let sizes = photo.photo_sizes();
        assert_eq!(sizes.len(), 3);
        assert_eq!(sizes[2].name, "60 x 80 mm");
    }

    #[test]
    fn test_fixed_set_size_snaps_to_last_smaller() {
        let mut photo = Photo::new(PhotoArgs::new(2100), &fixed_buckets("2100"), 1).unwrap();
        photo.set_size(SizeInput::Number(65.0)).unwrap();
        assert_eq!(photo.size(), Some(&ItemSize::Named("60 x 80 mm".to_string())));
        assert_eq!(photo.photo_size_id(), Some(3));
        assert_eq!(photo.width_mm(), Some(60.0));
        assert_eq!(photo.height_mm(), Some(80.0));

        photo.set_size(SizeInput::Text("50 x 70 mm".to_string())).unwrap();
        assert_eq!(photo.size(), Some(&ItemSize::Named("50 x 70 mm".to_string())));
    }

    #[test]
    fn test_free_set_size_clamps() {
        let mut photo = free_photo();
        photo.render(Bounds::new(300.0, 400.0)).unwrap();

        photo.set_size(SizeInput::Number(1000.0)).unwrap();
        assert_eq!(photo.size(), Some(&ItemSize::Millimetres(400.0)));
        assert_eq!(photo.ratio(), Some(1.0));

        photo.set_size(SizeInput::Number(1.0)).unwrap();
        assert_eq!(photo.size(), Some(&ItemSize::Millimetres(40.0)));

        photo.set_size(SizeInput::Text("large".to_string())).unwrap();
        assert_eq!(photo.size(), Some(&ItemSize::Millimetres(100.0)));
        assert_eq!(photo.height_mm(), Some(100.0));
        assert_eq!(photo.width_mm(), Some(75.0));
    }

    #[test]
    fn test_render_orients_mask() {
        let args = PhotoArgs::new(2500).with_mask(Mask::PortraitOval);
        let buckets = buckets("2500", vec![variant("1", 30.0, 300.0, 40.0, 400.0)]);
        let mut photo = Photo::new(args, &buckets, 1).unwrap();
        photo.render(Bounds::new(800.0, 600.0)).unwrap();

        assert_eq!(photo.state(), ItemState::Rendered);
        assert_eq!(photo.orientation(), Some(Orientation::Landscape));
        assert_eq!(photo.mask(), Mask::LandscapeOval);

        photo.apply_mask(Mask::PortraitRectangle).unwrap();
        assert_eq!(photo.mask(), Mask::LandscapeRectangle);
        photo.apply_mask(Mask::Square).unwrap();
        assert_eq!(photo.mask(), Mask::Square);
    }

    #[test]
    fn test_render_defaults_ratio_to_init_height() {
        let mut photo = free_photo();
        photo.render(Bounds::new(100.0, 200.0)).unwrap();
        assert_eq!(photo.size(), Some(&ItemSize::Millimetres(40.0)));
        assert_eq!(photo.ratio(), Some(0.2));
    }

    #[test]
    fn test_duplicate_keeps_look_and_offsets() {
        let args = PhotoArgs::new(2500)
            .with_mask(Mask::PortraitRectangle)
            .with_color(ColorFilter::Sepia);
        let buckets = buckets("2500", vec![variant("1", 30.0, 300.0, 40.0, 400.0)]);
        let mut photo = Photo::new(args, &buckets, 3).unwrap();
        photo.render(Bounds::new(100.0, 200.0)).unwrap();
        photo.set_size(SizeInput::Number(100.0)).unwrap();

        let copy = photo.duplicate(4).unwrap();
        assert_eq!(copy.item_id(), 4);
        assert_ne!(copy.item_id(), photo.item_id());
        assert_eq!(copy.mask(), photo.mask());
        assert_eq!(copy.color(), photo.color());
        assert_eq!(copy.ratio(), photo.ratio());
        assert_eq!(copy.state(), ItemState::Constructed);
        assert_eq!(copy.placement().x, photo.placement().x + 50.0);
    }

    #[test]
    fn test_duplicate_requires_render() {
        let photo = free_photo();
        assert_eq!(photo.duplicate(2).unwrap_err(), ItemError::NotRendered(1));
    }

    #[test]
    fn test_serialize_free_photo() {
        let mut photo = free_photo();
        photo.render(Bounds::new(300.0, 400.0)).unwrap();
        photo.set_size(SizeInput::Number(200.0)).unwrap();
        photo.apply_color(ColorFilter::Grey).unwrap();

        let snapshot = photo.serialize();
        assert_eq!(snapshot.size.as_deref(), Some("200"));
        assert_eq!(snapshot.width, Some(150.0));
        assert_eq!(snapshot.height, Some(200.0));
        assert_eq!(snapshot.color, 1);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["itemID"], 1);
        assert_eq!(json["type"], "Photo");
    }

    #[test]
    fn test_colour_matrices() {
        assert_eq!(ColorFilter::Grey.matrix()[0], [0.30, 0.30, 0.30, 0.0, 0.0]);
        assert_eq!(ColorFilter::Sepia.matrix()[2], [0.27, 0.53, 0.13, 0.0, 0.0]);
        assert_eq!(ColorFilter::from_code(2), Some(ColorFilter::Sepia));
        assert_eq!(Mask::from_code(9), None);
    }

    #[test]
    fn test_parse_named_size() {
        assert_eq!(parse_named_size("50 x 70 mm"), Some((50.0, 70.0)));
        assert_eq!(parse_named_size("big"), None);
    }
}
