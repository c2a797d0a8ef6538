//! Retail prices of placed photos and motifs.
//!
//! Every priced addition carries `<price_model>` tiers. A tier is picked by
//! quantity and note, then its model `base+rate($q-threshold)` is
//! evaluated at the quantity and scaled by the tier's retail multiplier.

use std::str::FromStr;

use thiserror::Error;

use crate::models::{AdditionBuckets, Artwork, ColorFilter, ItemKind, Photo, PriceTier};

/// Errors raised while pricing an item.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The item's addition record has no price tiers
    #[error("no price tiers for {kind} product {product_id}")]
    NoPriceTiers {
        /// Item kind being priced
        kind: ItemKind,
        /// Catalog id of the item
        product_id: String,
    },
    /// The tier's model is not `base+rate($q-threshold)`
    #[error("malformed price formula {0:?}")]
    MalformedFormula(String),
    /// The item has no size in millimetres yet
    #[error("item {0} has no size")]
    Unsized(u32),
}

/// A parsed `base+rate($q-threshold)` price model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceFormula {
    /// Price at the threshold
    pub base: f64,
    /// Price per unit above the threshold
    pub rate: f64,
    /// Quantity the rate starts from
    pub threshold: f64,
}

impl PriceFormula {
    /// `base + rate * (quantity - threshold)`, rounded to cents.
    #[must_use]
    pub fn evaluate(&self, quantity: f64) -> f64 {
        round_cents(self.rate.mul_add(quantity - self.threshold, self.base))
    }
}

impl FromStr for PriceFormula {
    type Err = PricingError;

    fn from_str(model: &str) -> Result<Self, Self::Err> {
        let malformed = || PricingError::MalformedFormula(model.to_string());
        let number = |text: &str| text.trim().parse::<f64>().map_err(|_| malformed());

        let [base, rest] = split_exact(model, '+').ok_or_else(malformed)?;
        let [rate, rest] = split_exact(rest, '(').ok_or_else(malformed)?;
        let [_, threshold] = split_exact(rest, '-').ok_or_else(malformed)?;

        Ok(Self {
            base: number(base)?,
            rate: number(rate)?,
            threshold: number(threshold.trim_end().trim_end_matches(')'))?,
        })
    }
}

/// Splits on `sep`, requiring exactly one occurrence.
fn split_exact(text: &str, sep: char) -> Option<[&str; 2]> {
    let (left, right) = text.split_once(sep)?;
    (!right.contains(sep)).then_some([left, right])
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// How a price model measures quantity (`quantity_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityType {
    /// Width plus height in mm
    WidthPlusHeight,
    /// Width times height in mm
    WidthTimesHeight,
    /// One per item
    Units,
    /// Surface area; items use their default measure
    SurfaceArea,
    /// Largest side; items use their default measure
    MaxDimension,
    /// Unrecognised; items use their default measure
    Other,
}

impl QuantityType {
    /// Reads a `quantity_type` attribute; unit suffixes such as `(mm)` are
    /// ignored.
    #[must_use]
    pub fn from_attr(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("Width + Height") {
            Self::WidthPlusHeight
        } else if value.starts_with("Width * Height") {
            Self::WidthTimesHeight
        } else if value.starts_with("Units") {
            Self::Units
        } else if value.starts_with("Surfacearea") {
            Self::SurfaceArea
        } else if value.starts_with("Max Dimmension") || value.starts_with("Max Dimension") {
            Self::MaxDimension
        } else {
            Self::Other
        }
    }

    fn of(tiers: &[PriceTier]) -> Self {
        tiers
            .first()
            .and_then(|tier| tier.quantity_type.as_deref())
            .map_or(Self::Other, Self::from_attr)
    }
}

/// Picks the tier covering `quantity` whose note matches `note`
/// (case-insensitive).
#[must_use]
pub fn tier_for<'a>(tiers: &'a [PriceTier], quantity: f64, note: &str) -> Option<&'a PriceTier> {
    tiers
        .iter()
        .find(|tier| tier.covers(quantity) && tier.note_or_empty().eq_ignore_ascii_case(note))
}

fn price_with(tier: &PriceTier, quantity: f64) -> Result<f64, PricingError> {
    let model = tier.model.as_deref().unwrap_or_default();
    let formula: PriceFormula = model.parse()?;
    let multiplier = tier.retail_multiplier.filter(|m| *m != 0.0).unwrap_or(1.0);
    Ok(round_cents(formula.evaluate(quantity) * multiplier))
}

/// Prices placed items from the tiers of their addition records.
pub struct PricingService;

impl PricingService {
    /// Price of a photo at its current size.
    ///
    /// Quantity follows the model's `quantity_type` (width + height by
    /// default). Tiers noted `bw` apply to grey photos and `color` to the
    /// rest; without a match any covering tier is used, then the last one.
    ///
    /// # Errors
    ///
    /// Fails when the photo has no size, its image record has no tiers or
    /// the chosen tier's model is malformed.
    pub fn photo_price(photo: &Photo, buckets: &AdditionBuckets) -> Result<f64, PricingError> {
        let product_id = photo.product_id();
        let no_tiers = || PricingError::NoPriceTiers {
            kind: ItemKind::Photo,
            product_id: product_id.to_string(),
        };
        let tiers = buckets
            .images
            .iter()
            .rev()
            .find(|image| image.id.trim().parse::<u32>().ok() == Some(product_id))
            .map(|image| image.prices.as_slice())
            .filter(|tiers| !tiers.is_empty())
            .ok_or_else(no_tiers)?;

        let (Some(width), Some(height)) = (photo.width_mm(), photo.height_mm()) else {
            return Err(PricingError::Unsized(photo.item_id()));
        };
        let quantity = match QuantityType::of(tiers) {
            QuantityType::WidthTimesHeight => width * height,
            QuantityType::Units => 1.0,
            _ => width + height,
        };
        let note = if photo.color() == ColorFilter::Grey { "bw" } else { "color" };

        let tier = tier_for(tiers, quantity, note)
            .or_else(|| tiers.iter().find(|tier| tier.covers(quantity)))
            .or_else(|| tiers.last())
            .ok_or_else(no_tiers)?;
        price_with(tier, quantity)
    }

    /// Price of a motif at its current height in `color` (`#rrggbb`).
    ///
    /// Laser products include motifs for free. The note follows the
    /// colour: gold and silver gilding, standard for black and white, paint
    /// fill otherwise. Without a match a covering tier with no note is
    /// used, then the first tier.
    ///
    /// # Errors
    ///
    /// Fails when the motif has no size, the motif record has no tiers or
    /// the chosen tier's model is malformed.
    pub fn motif_price(
        motif: &Artwork,
        buckets: &AdditionBuckets,
        color: &str,
        laser: bool,
    ) -> Result<f64, PricingError> {
        if laser {
            return Ok(0.0);
        }
        let no_tiers = || PricingError::NoPriceTiers {
            kind: ItemKind::Motif,
            product_id: motif.product_id().to_string(),
        };
        let tiers = buckets
            .motifs
            .first()
            .map(|record| record.prices.as_slice())
            .filter(|tiers| !tiers.is_empty())
            .ok_or_else(no_tiers)?;

        let height = motif.size().ok_or(PricingError::Unsized(motif.item_id()))?;
        let quantity = match QuantityType::of(tiers) {
            QuantityType::Units => 1.0,
            QuantityType::WidthTimesHeight => height * height,
            _ => height,
        };

        let tier = tier_for(tiers, quantity, motif_note(color))
            .or_else(|| tier_for(tiers, quantity, ""))
            .or_else(|| tiers.first())
            .ok_or_else(no_tiers)?;
        price_with(tier, quantity)
    }
}

fn motif_note(color: &str) -> &'static str {
    match color.to_ascii_lowercase().as_str() {
        "#c99d44" => "Gold Gilding",
        "#eeeeee" => "Silver Gilding",
        "#000000" | "#ffffff" => "Standard",
        _ => "Paint Fill",
    }
}
