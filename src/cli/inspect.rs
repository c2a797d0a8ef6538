//! Inspect command: load a product catalog and summarize it.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CatalogArgs, CliResult};
use crate::models::{Catalog, Section};

/// Load a product catalog and print a summary
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Where the catalog comes from
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Bucket sizes after addition resolution.
#[derive(Debug, Serialize)]
pub struct BucketCounts {
    /// Base records
    pub bases: usize,
    /// Border records
    pub borders: usize,
    /// Inscription records
    pub inscriptions: usize,
    /// Motif records
    pub motifs: usize,
    /// Image records
    pub images: usize,
    /// Emblem records
    pub emblems: usize,
    /// Size records
    pub sizes: usize,
    /// Stand records
    pub stand: usize,
}

/// Catalog summary.
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    /// Catalog id the summary is for
    pub product_id: String,
    /// Product name from the catalog document
    pub name: Option<String>,
    /// Product code
    pub code: Option<String>,
    /// Construction family (`headstone`, `plaque`, ...)
    pub product_type: Option<String>,
    /// Whether the construction carries a base
    pub has_base: Option<bool>,
    /// Country the product was loaded for
    pub country: String,
    /// Promo codes fetched for the country
    pub promo_codes: usize,
    /// Raw addition references on the product
    pub additions: usize,
    /// Resolved additions per bucket
    pub buckets: BucketCounts,
    /// Shapes the product offers
    pub shapes: usize,
    /// Product price tiers
    pub price_tiers: usize,
    /// Materials after resolution
    pub materials: usize,
    /// Sections the designer shows
    pub sections: Vec<Section>,
}

impl InspectOutput {
    fn from_catalog(catalog: &Catalog) -> Self {
        let buckets = &catalog.buckets;
        let construction = catalog.construction.as_ref();
        Self {
            product_id: catalog.product_id.clone(),
            name: catalog.product.as_ref().and_then(|p| p.name.clone()),
            code: catalog.product.as_ref().and_then(|p| p.code.clone()),
            product_type: construction
                .and_then(|c| c.product_type)
                .map(|t| t.to_string()),
            has_base: construction.map(|c| c.has_base),
            country: catalog.country.name.clone(),
            promo_codes: catalog.promo_codes.as_ref().map_or(0, |codes| codes.len()),
            additions: catalog.additions.len(),
            buckets: BucketCounts {
                bases: buckets.bases.len(),
                borders: buckets.borders.len(),
                inscriptions: buckets.inscriptions.len(),
                motifs: buckets.motifs.len(),
                images: buckets.images.len(),
                emblems: buckets.emblems.len(),
                sizes: buckets.sizes.len(),
                stand: buckets.stand.len(),
            },
            shapes: catalog.shapes.len(),
            price_tiers: catalog.price_model.len(),
            materials: catalog.materials.len(),
            sections: catalog.sections().to_vec(),
        }
    }
}

impl InspectArgs {
    /// Execute the inspect command
    pub async fn execute(&self) -> CliResult<()> {
        let config = self.catalog.config()?;
        let catalog = self.catalog.load(&config).await?;
        let output = InspectOutput::from_catalog(&catalog);

        if self.catalog.json {
            return print_json(&output);
        }

        println!(
            "Product {}: {}",
            output.product_id,
            output.name.as_deref().unwrap_or("(catalog only)")
        );
        if let Some(code) = &output.code {
            println!("  Code:         {code}");
        }
        if let Some(product_type) = &output.product_type {
            println!("  Type:         {product_type}");
        }
        if let Some(has_base) = output.has_base {
            println!("  Base:         {}", if has_base { "yes" } else { "no" });
        }
        println!("  Country:      {}", output.country);
        println!("  Promo codes:  {}", output.promo_codes);
        println!("  Additions:    {}", output.additions);
        println!(
            "  Buckets:      bases {}, borders {}, inscriptions {}, motifs {}, images {}, emblems {}, sizes {}, stand {}",
            output.buckets.bases,
            output.buckets.borders,
            output.buckets.inscriptions,
            output.buckets.motifs,
            output.buckets.images,
            output.buckets.emblems,
            output.buckets.sizes,
            output.buckets.stand
        );
        println!("  Shapes:       {}", output.shapes);
        println!("  Price tiers:  {}", output.price_tiers);
        println!("  Materials:    {}", output.materials);

        if !output.sections.is_empty() {
            let names: Vec<&str> = output.sections.iter().map(|s| s.as_str()).collect();
            println!("  Sections:     {}", names.join(", "));
        }

        Ok(())
    }
}
