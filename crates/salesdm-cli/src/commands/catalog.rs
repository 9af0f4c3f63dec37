//! Catalog command

use crate::app::{CatalogAction, CatalogArgs, OutputFormat};
use crate::output;
use anyhow::Result;
use salesdm_core::Database;

pub async fn run(args: CatalogArgs, db: &mut Database, format: OutputFormat) -> Result<()> {
    match args.action {
        CatalogAction::Init => {
            // schema is created on open
            println!(
                "Catalog ready (schema version {})",
                db.schema_version()?.unwrap_or_default()
            );
        }
        CatalogAction::Seed => {
            let inserted = db.seed_default_catalog()?;
            if inserted == 0 {
                println!("Catalog already has products, nothing seeded");
            } else {
                println!("Seeded {} products", inserted);
            }
        }
        CatalogAction::Import { file, replace } => {
            let imported = if replace {
                let (removed, imported) = db.replace_products_from_file(&file)?;
                println!("Removed {} products", removed);
                imported
            } else {
                db.import_products(&file)?
            };
            println!("Imported {} products from {}", imported, file.display());
        }
        CatalogAction::List { limit } => {
            let products = db.list_products(limit)?;
            print!("{}", output::format_products(&products, format));
        }
    }
    Ok(())
}
