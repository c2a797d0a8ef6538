//! Fixed option lists for sections that are not driven by catalog documents.

use serde::Serialize;

use crate::models::{ProductType, Section};

/// One selectable option of a fixed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionOption {
    /// Position in the list
    pub nr: u8,
    /// Label shown to the user
    pub name: &'static str,
    /// Value stored on the monument when picked
    pub option: u8,
    /// Product family the option applies to
    pub class: ProductType,
    /// Thumbnail path
    pub img: &'static str,
}

const fn option(
    nr: u8,
    name: &'static str,
    option: u8,
    class: ProductType,
    img: &'static str,
) -> SectionOption {
    SectionOption {
        nr,
        name,
        option,
        class,
        img,
    }
}

const INSTALLATIONS: [SectionOption; 3] = [
    option(1, "Only lay flat", 2, ProductType::MiniHeadstones, "data/png/installations/flat.png"),
    option(2, "With granite base", 1, ProductType::MiniHeadstones, "data/png/installations/base.png"),
    option(3, "Buried into ground", 3, ProductType::MiniHeadstones, "data/png/installations/ground.png"),
];

const FIXING_SYSTEM: [SectionOption; 3] = [
    option(1, "Flat Back", 1, ProductType::Plaques, "data/png/fixingsystem/fixing-flat-back.png"),
    option(2, "Lugs with Studs", 2, ProductType::Plaques, "data/png/fixingsystem/fixing-lugs-with-studs.png"),
    option(3, "Screws (visible from front)", 3, ProductType::Plaques, "data/png/fixingsystem/fixing-screws.png"),
];

const CORNERS: [SectionOption; 2] = [
    option(1, "Rounded", 1, ProductType::Plaques, "data/png/corners/rounded.png"),
    option(2, "Straight", 2, ProductType::Plaques, "data/png/corners/straight.png"),
];

const HOLES: [SectionOption; 3] = [
    option(1, "On corners", 1, ProductType::Plaques, "data/png/holes/4-on-4-corners.png"),
    option(2, "On top corners", 2, ProductType::Plaques, "data/png/holes/2-on-top-2-corners.png"),
    option(3, "No drilled holes", 3, ProductType::Plaques, "data/png/holes/no-drilled-holes.png"),
];

const STANDS: [SectionOption; 3] = [
    option(1, "No stand", 1, ProductType::Plaques, "data/svg/borders/border_0_0x000000.svg"),
    option(2, "Separate", 2, ProductType::Plaques, "data/jpg/stand/separate.jpg"),
    option(3, "Inbuilt", 3, ProductType::Plaques, "data/svg/borders/border_0_raised_0x000000.svg"),
];

/// Fixed options of `section` for a product family.
///
/// Sections fed by catalog documents have no fixed options.
#[must_use]
pub fn fixed_options(section: Section, product_type: Option<ProductType>) -> Vec<SectionOption> {
    let table: &[SectionOption] = match section {
        Section::Installations => &INSTALLATIONS,
        Section::FixingSystem => &FIXING_SYSTEM,
        Section::Corners => &CORNERS,
        Section::Holes => &HOLES,
        Section::Stand => &STANDS,
        _ => &[],
    };
    table
        .iter()
        .filter(|entry| Some(entry.class) == product_type)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_filtered_by_class() {
        assert_eq!(fixed_options(Section::Corners, Some(ProductType::Plaques)).len(), 2);
        assert!(fixed_options(Section::Corners, Some(ProductType::Headstones)).is_empty());
        assert!(fixed_options(Section::Corners, None).is_empty());
        assert_eq!(
            fixed_options(Section::Installations, Some(ProductType::MiniHeadstones))[0].option,
            2
        );
    }

    #[test]
    fn test_catalog_sections_have_no_fixed_options() {
        assert!(fixed_options(Section::Borders, Some(ProductType::Plaques)).is_empty());
    }
}
