//! Material family records.

use serde::{Deserialize, Serialize};

/// A material texture with its area and volume price multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Texture path: `<materials path>` + `"s/"` + material id
    pub file: String,
    /// Display name
    pub name: String,
    /// Area multiplier, 1 when the catalog leaves it out
    pub m2: f64,
    /// Volume multiplier, 1 when the catalog leaves it blank
    pub m3: f64,
}

impl Material {
    /// Builds the texture path for a material id under a family path.
    #[must_use]
    pub fn texture_path(path: &str, id: &str) -> String {
        format!("{path}s/{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_path() {
        assert_eq!(
            Material::texture_path("data/jpg/granite/", "17"),
            "data/jpg/granite/s/17"
        );
    }
}
