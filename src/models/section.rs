//! Designer sections (side panels) a product can expose.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A designer section controller kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Product picker
    Products,
    /// Size picker
    Sizes,
    /// Installation method
    Installations,
    /// Fixing system
    FixingSystem,
    /// Corner style
    Corners,
    /// Hole options
    Holes,
    /// Plaque stand
    Stand,
    /// Shape picker
    Shapes,
    /// Material picker
    Materials,
    /// Borders
    Borders,
    /// Inscriptions
    Inscriptions,
    /// Photos
    Photos,
    /// Motifs
    Motifs,
    /// Emblems
    Emblems,
    /// Session settings
    Settings,
}

impl Section {
    /// Every section in display order.
    pub const ALL: [Self; 15] = [
        Self::Products,
        Self::Sizes,
        Self::Installations,
        Self::FixingSystem,
        Self::Corners,
        Self::Holes,
        Self::Stand,
        Self::Shapes,
        Self::Materials,
        Self::Borders,
        Self::Inscriptions,
        Self::Photos,
        Self::Motifs,
        Self::Emblems,
        Self::Settings,
    ];

    /// Identifier used in URLs and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Sizes => "sizes",
            Self::Installations => "installations",
            Self::FixingSystem => "fixing-system",
            Self::Corners => "corners",
            Self::Holes => "holes",
            Self::Stand => "stand",
            Self::Shapes => "shapes",
            Self::Materials => "materials",
            Self::Borders => "borders",
            Self::Inscriptions => "inscriptions",
            Self::Photos => "photos",
            Self::Motifs => "motifs",
            Self::Emblems => "emblems",
            Self::Settings => "settings",
        }
    }

    /// Default panel title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Products => "Select Product",
            Self::Sizes => "Select Size",
            Self::Installations => "Installation",
            Self::FixingSystem => "Fixing System",
            Self::Corners => "Corners",
            Self::Holes => "Holes",
            Self::Stand => "Select Stand",
            Self::Shapes => "Select Shape",
            Self::Materials => "Select Material",
            Self::Borders => "Select Border",
            Self::Inscriptions => "Add Your Inscription",
            Self::Photos => "Add Your Image",
            Self::Motifs => "Add Your Motif",
            Self::Emblems => "Add Your Emblem",
            Self::Settings => "Settings",
        }
    }

    /// Parses a section identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_str() == id)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_roundtrips_all() {
        for section in Section::ALL {
            assert_eq!(Section::from_id(section.as_str()), Some(section));
        }
        assert_eq!(Section::from_id("lamp"), None);
    }
}
