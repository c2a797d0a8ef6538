//! Material family resolution.

use crate::constants::material_document;
use crate::error::{CatalogError, Result};
use crate::models::{Material, ProductConfig};
use crate::parser::parse_materials;
use crate::services::source::CatalogSource;

/// Fetches the material family named by a product. Not cached.
pub struct MaterialResolver<'a> {
    source: &'a dyn CatalogSource,
}

impl<'a> MaterialResolver<'a> {
    /// A resolver reading from `source`.
    pub fn new(source: &'a dyn CatalogSource) -> Self {
        Self { source }
    }

    /// Loads `{code}/{product.material}.xml`.
    ///
    /// # Errors
    ///
    /// Fails when the product names no material family, or the family
    /// document cannot be fetched or parsed.
    pub async fn resolve(&self, code: &str, product: &ProductConfig) -> Result<Vec<Material>> {
        let family = product
            .material
            .as_deref()
            .filter(|family| !family.trim().is_empty())
            .ok_or_else(|| CatalogError::NoMaterial(product.id.clone()))?;
        let document = material_document(code, family);
        let text = self.source.fetch(&document).await?;
        parse_materials(&document, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::source::MemorySource;

    #[tokio::test]
    async fn test_resolve_family_by_language() {
        let source = MemorySource::new().with(
            "data/xml/en_EN/bronzes.xml",
            r#"<materials path="data/jpg/bronzes/"><material id="3" name="Brown"/></materials>"#,
        );
        let product = ProductConfig {
            id: "5".to_string(),
            material: Some("bronzes".to_string()),
            ..ProductConfig::default()
        };

        let materials = MaterialResolver::new(&source).resolve("en_EN", &product).await.unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].file, "data/jpg/bronzes/s/3");
        assert_eq!(materials[0].m2, 1.0);
    }

    #[tokio::test]
    async fn test_product_without_material() {
        let source = MemorySource::new();
        let product = ProductConfig {
            id: "5".to_string(),
            ..ProductConfig::default()
        };
        let err = MaterialResolver::new(&source).resolve("en_EN", &product).await.unwrap_err();
        assert!(matches!(err, CatalogError::NoMaterial(id) if id == "5"));
    }
}
