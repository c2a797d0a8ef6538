//! Pricing reference data carried by catalog products and additions.

use serde::{Deserialize, Serialize};

/// A fixed-quantity pricing tier from a `<price_model>` block.
///
/// `quantity_type` and `currency` are attributes of the enclosing
/// `<price_model>` and are copied onto every tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PriceTier {
    /// Tier identifier
    pub id: Option<String>,
    /// Ordinal within the price model
    pub nr: Option<String>,
    /// Product code the tier applies to
    pub code: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Pricing model expression (e.g., "fixed", "m2")
    pub model: Option<String>,
    /// First quantity covered by this tier
    pub start_quantity: Option<f64>,
    /// Last quantity covered by this tier
    pub end_quantity: Option<f64>,
    /// Multiplier applied to wholesale to obtain retail price
    pub retail_multiplier: Option<f64>,
    /// Free-form note
    pub note: Option<String>,
    /// Unit the quantities are expressed in
    pub quantity_type: Option<String>,
    /// ISO currency code
    pub currency: Option<String>,
}

impl PriceTier {
    /// Returns true if `quantity` falls inside this tier's range.
    ///
    /// Open bounds (missing start, missing or zero end) always match on
    /// that side.
    #[must_use]
    pub fn covers(&self, quantity: f64) -> bool {
        let above_start = self.start_quantity.is_none_or(|start| quantity >= start);
        let below_end = self
            .end_quantity
            .is_none_or(|end| end == 0.0 || quantity <= end);
        above_start && below_end
    }

    /// The tier's note, empty when absent.
    #[must_use]
    pub fn note_or_empty(&self) -> &str {
        self.note.as_deref().unwrap_or_default()
    }
}

/// Entry of the product's own price model (`<price_model id=product>`).
///
/// Unlike [`PriceTier`] the quantities are kept as written in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PriceModelEntry {
    /// Tier id
    pub id: Option<String>,
    /// Display number
    pub nr: Option<String>,
    /// Product code
    pub code: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Formula, `base+rate(quantity-threshold)`
    pub model: Option<String>,
    /// First quantity covered
    pub start_quantity: Option<String>,
    /// Last quantity covered
    pub end_quantity: Option<String>,
    /// How the quantity is measured
    pub quantity_type: Option<String>,
    /// Retail multiplier
    pub retail_multiplier: Option<String>,
    /// Tier note
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_closed_range() {
        let tier = PriceTier {
            start_quantity: Some(1.0),
            end_quantity: Some(10.0),
            ..PriceTier::default()
        };
        assert!(tier.covers(1.0));
        assert!(tier.covers(10.0));
        assert!(!tier.covers(11.0));
        assert!(!tier.covers(0.5));
    }

    #[test]
    fn test_covers_open_end() {
        let tier = PriceTier {
            start_quantity: Some(5.0),
            ..PriceTier::default()
        };
        assert!(tier.covers(500.0));
        assert!(!tier.covers(4.0));

        let zero_end = PriceTier {
            start_quantity: Some(5.0),
            end_quantity: Some(0.0),
            ..PriceTier::default()
        };
        assert!(zero_end.covers(10_000.0));
    }
}
