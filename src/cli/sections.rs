//! Sections command: render the designer sections of a product.

use clap::Args;

use crate::cli::common::{print_json, CatalogArgs, CliResult};
use crate::context::{DesignContext, Sections};

/// Render the designer sections a product offers
#[derive(Debug, Clone, Args)]
pub struct SectionsArgs {
    /// Where the catalog comes from
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl SectionsArgs {
    /// Execute the sections command
    pub async fn execute(&self) -> CliResult<()> {
        let config = self.catalog.config()?;
        let catalog = self.catalog.load(&config).await?;

        let mut ctx = DesignContext::new(config.catalog.settings(), config.catalog.mode);
        ctx.set_catalog(catalog);
        let views = Sections::for_context(&ctx).render_all(&ctx);

        if self.catalog.json {
            return print_json(&views);
        }

        for view in &views {
            println!("{} ({} entries)", view.title, view.entries.len());
            for entry in &view.entries {
                println!("  {:>6}  {}", entry.id, entry.name);
            }
        }

        Ok(())
    }
}
