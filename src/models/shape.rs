//! Geometry variants offered for a product.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-type file variant of a shape (`<shape><file type=…>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShapeFile {
    /// File kind
    #[serde(rename = "type")]
    pub file_type: String,
    /// Smallest depth in mm
    pub min_depth: Option<f64>,
    /// Largest depth in mm
    pub max_depth: Option<f64>,
    /// Starting depth in mm
    pub init_depth: Option<f64>,
    /// Smallest height in mm
    pub min_height: Option<f64>,
    /// Largest height in mm
    pub max_height: Option<f64>,
    /// Starting height in mm
    pub init_height: Option<f64>,
    /// Smallest width in mm
    pub min_width: Option<f64>,
    /// Largest width in mm
    pub max_width: Option<f64>,
    /// Starting width in mm
    pub init_width: Option<f64>,
    /// Non-zero when the size is fixed
    pub fixed: Option<f64>,
    /// Primary colour
    pub color: Option<String>,
    /// Secondary colour
    pub color2: Option<String>,
    /// 3D model
    pub url_3d: Option<String>,
}

/// A named geometry variant (`<shape>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Shape {
    /// Shape type
    #[serde(rename = "type")]
    pub shape_type: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Double headstone flag
    pub double: Option<String>,
    /// Stand flag
    pub stand: Option<String>,
    /// Shape code
    pub code: Option<String>,
    /// Outline asset
    pub url: Option<String>,
    /// File variants keyed by their `type` attribute
    pub files: BTreeMap<String, ShapeFile>,
}

impl Shape {
    /// Returns the file variant for a part type ("headstone", "base", ...).
    #[must_use]
    pub fn file(&self, file_type: &str) -> Option<&ShapeFile> {
        self.files.get(file_type)
    }
}
