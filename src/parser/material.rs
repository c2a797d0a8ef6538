//! Material family documents (`{code}/{family}.xml`).

use crate::error::{CatalogError, Result};
use crate::models::Material;
use crate::parser::xml::{elements, first_element, number_attr, parse_document, text_attr};

/// Reads every `<material>` of a family document.
///
/// Missing or blank `m2`/`m3` multipliers default to 1.
///
/// # Errors
///
/// Fails on malformed XML, a document without `<materials>`, or
/// multipliers that are not numbers.
pub fn parse_materials(document: &str, text: &str) -> Result<Vec<Material>> {
    const EL: &str = "material";
    let doc = parse_document(document, text)?;
    let root = doc.root_element();
    let materials = first_element(root, "materials").ok_or_else(|| CatalogError::MissingElement {
        document: document.to_string(),
        element: "materials",
    })?;
    let path = text_attr(materials, "path").unwrap_or_default();

    elements(root, "material")
        .map(|material| {
            let id = material.attribute("id").unwrap_or_default();
            Ok(Material {
                file: Material::texture_path(&path, id),
                name: text_attr(material, "name").unwrap_or_default(),
                m2: number_attr(material, "m2", EL)?.unwrap_or(1.0),
                m3: number_attr(material, "m3", EL)?.unwrap_or(1.0),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materials_with_defaults() {
        let xml = r#"<materials path="data/jpg/granites/">
            <material id="1" name="Imperial Red" m2="1.2" m3="1.5"/>
            <material id="2" name="African Black" m3=""/>
        </materials>"#;
        let materials = parse_materials("granites.xml", xml).unwrap();
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[0].file, "data/jpg/granites/s/1");
        assert_eq!(materials[0].m2, 1.2);
        assert_eq!(materials[1].m2, 1.0);
        assert_eq!(materials[1].m3, 1.0);
    }

    #[test]
    fn test_missing_materials_root() {
        let err = parse_materials("bronzes.xml", "<catalog/>").unwrap_err();
        assert!(matches!(err, CatalogError::MissingElement { element: "materials", .. }));
    }
}
