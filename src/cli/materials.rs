//! Materials command: list the material family of a product.

use clap::Args;

use crate::cli::common::{print_json, CatalogArgs, CliError, CliResult};
use crate::models::DesignMode;

/// List the materials offered for a product
#[derive(Debug, Clone, Args)]
pub struct MaterialsArgs {
    /// Where the catalog comes from
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl MaterialsArgs {
    /// Execute the materials command
    pub async fn execute(&self) -> CliResult<()> {
        let config = self.catalog.config()?;
        if config.catalog.mode == DesignMode::Web {
            return Err(CliError::validation(
                "Materials are not loaded in web mode; use --mode 2d or 3d",
            ));
        }
        let catalog = self.catalog.load(&config).await?;

        if self.catalog.json {
            return print_json(&catalog.materials);
        }

        if catalog.materials.is_empty() {
            println!("No materials for product {}", catalog.product_id);
            return Ok(());
        }

        println!("{:<24} {:>6} {:>6}  Texture", "Name", "m2", "m3");
        for material in &catalog.materials {
            println!(
                "{:<24} {:>6} {:>6}  {}",
                material.name, material.m2, material.m3, material.file
            );
        }

        Ok(())
    }
}
