//! Construct step: product classification and visible sections.

use crate::models::{Construction, ProductConfig, ProductType, Section};

/// Products whose shape can be changed.
const SHAPED_PRODUCTS: [u32; 10] = [3, 4, 5, 8, 22, 10, 30, 34, 35, 999];
/// Plaques mounted with a fixing system.
const FIXING_SYSTEM_PRODUCTS: [u32; 2] = [5, 999];
/// Plaque with selectable corners and holes, and no photos.
const CORNERS_PRODUCT: u32 = 52;
/// Plaque on a stand, without material choice.
const STAND_PRODUCT: u32 = 31;
/// Plaque sold in one size.
const SINGLE_SIZE_PLAQUE: u32 = 135;

/// Classifies products and decides which designer sections they offer.
pub struct ConstructService;

impl ConstructService {
    /// Runs the construct step for a loaded product.
    #[must_use]
    pub fn construct(product: &ProductConfig) -> Construction {
        Construction {
            product_type: Self::product_type(product),
            has_base: Self::has_base(product),
            sections: Self::visible_sections(product),
        }
    }

    /// Product family from the product code (and, for plaques, its name).
    ///
    /// Returns `None` for codes the designer does not know.
    #[must_use]
    pub fn product_type(product: &ProductConfig) -> Option<ProductType> {
        let name = product.name.as_deref().unwrap_or_default();
        match product.code() {
            "Plaque" if name.contains("Pet Plaque") => Some(ProductType::Petplaques),
            "Plaque" if name.contains("Pet Rock") => Some(ProductType::Petrock),
            "Plaque" if name.contains("Full-colour") => Some(ProductType::Fullcolourplaque),
            "Plaque" => Some(ProductType::Plaques),
            "Headstone" | "Full Monument" => Some(ProductType::Headstones),
            "Mini Headstone" => Some(ProductType::MiniHeadstones),
            "Urn" => Some(ProductType::Urns),
            "Image" => Some(ProductType::Images),
            _ => None,
        }
    }

    /// Plaques and urns stand alone; everything else may sit on a base.
    #[must_use]
    pub fn has_base(product: &ProductConfig) -> bool {
        !matches!(product.code(), "Plaque" | "Urn")
    }

    /// Sections offered for a product, in display order.
    #[must_use]
    pub fn visible_sections(product: &ProductConfig) -> Vec<Section> {
        let id = product.numeric_id();
        let code = product.code();
        let is_plaque = code == "Plaque";

        Section::ALL
            .into_iter()
            .filter(|section| match section {
                Section::Sizes => match code {
                    "Headstone" => !matches!(product.fixed, Some(f) if f == 1.0 || f == 2.0),
                    "Mini Headstone" | "Urn" => false,
                    "Plaque" => id != SINGLE_SIZE_PLAQUE,
                    _ => true,
                },
                Section::Installations => code == "Mini Headstone",
                Section::FixingSystem => is_plaque && FIXING_SYSTEM_PRODUCTS.contains(&id),
                Section::Corners | Section::Holes => is_plaque && id == CORNERS_PRODUCT,
                Section::Stand => is_plaque && id == STAND_PRODUCT,
                Section::Materials => {
                    matches!(product.formula(), "Engraved" | "Enamel" | "Steel" | "Bronze")
                        && id != STAND_PRODUCT
                }
                Section::Emblems => product.formula() == "Bronze",
                Section::Shapes => SHAPED_PRODUCTS.contains(&id),
                Section::Photos => id != CORNERS_PRODUCT,
                Section::Borders => product.has_border(),
                Section::Products
                | Section::Inscriptions
                | Section::Motifs
                | Section::Settings => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, code: &str, name: &str, formula: &str) -> ProductConfig {
        ProductConfig {
            id: id.to_string(),
            code: Some(code.to_string()),
            name: Some(name.to_string()),
            formula: Some(formula.to_string()),
            ..ProductConfig::default()
        }
    }

    #[test]
    fn test_product_type() {
        let cases = [
            ("Plaque", "Bronze Pet Plaque", Some(ProductType::Petplaques)),
            ("Plaque", "Pet Rock", Some(ProductType::Petrock)),
            ("Plaque", "Full-colour Plaque", Some(ProductType::Fullcolourplaque)),
            ("Plaque", "Bronze Plaque", Some(ProductType::Plaques)),
            ("Full Monument", "Full Monument", Some(ProductType::Headstones)),
            ("Mini Headstone", "Mini", Some(ProductType::MiniHeadstones)),
            ("Urn", "Urn", Some(ProductType::Urns)),
            ("Image", "Photo", Some(ProductType::Images)),
            ("Bench", "Bench", None),
        ];
        for (code, name, expected) in cases {
            assert_eq!(
                ConstructService::product_type(&product("1", code, name, "")),
                expected,
                "{code} / {name}"
            );
        }
    }

    #[test]
    fn test_has_base() {
        assert!(!ConstructService::has_base(&product("1", "Plaque", "", "")));
        assert!(!ConstructService::has_base(&product("1", "Urn", "", "")));
        assert!(ConstructService::has_base(&product("1", "Headstone", "", "")));
        assert!(ConstructService::has_base(&product("1", "Bench", "", "")));
    }

    #[test]
    fn test_fixed_headstone_hides_sizes() {
        let mut headstone = product("4", "Headstone", "Upright", "Laser");
        headstone.fixed = Some(1.0);
        let sections = ConstructService::visible_sections(&headstone);
        assert!(!sections.contains(&Section::Sizes));
        assert!(sections.contains(&Section::Shapes));
        assert!(!sections.contains(&Section::Materials));

        headstone.fixed = Some(0.0);
        assert!(ConstructService::visible_sections(&headstone).contains(&Section::Sizes));
    }

    #[test]
    fn test_plaque_specials() {
        let corners = ConstructService::visible_sections(&product("52", "Plaque", "Granite", "Engraved"));
        assert!(corners.contains(&Section::Corners));
        assert!(corners.contains(&Section::Holes));
        assert!(!corners.contains(&Section::Photos));
        assert!(corners.contains(&Section::Materials));

        let stand = ConstructService::visible_sections(&product("31", "Plaque", "Desk", "Bronze"));
        assert!(stand.contains(&Section::Stand));
        assert!(stand.contains(&Section::Emblems));
        assert!(!stand.contains(&Section::Materials));

        let fixing = ConstructService::visible_sections(&product("5", "Plaque", "Bronze", "Bronze"));
        assert!(fixing.contains(&Section::FixingSystem));
        assert!(fixing.contains(&Section::Shapes));
    }

    #[test]
    fn test_borders_follow_product_border() {
        let mut plaque = product("1", "Plaque", "Bronze", "Bronze");
        assert!(!ConstructService::visible_sections(&plaque).contains(&Section::Borders));
        plaque.border = Some(1.0);
        assert!(ConstructService::visible_sections(&plaque).contains(&Section::Borders));
    }

    #[test]
    fn test_mini_headstone_installations() {
        let sections = ConstructService::visible_sections(&product("22", "Mini Headstone", "Mini", "Laser"));
        assert!(sections.contains(&Section::Installations));
        assert!(!sections.contains(&Section::Sizes));
    }
}
