//! Catalog import from JSON or CSV files

use super::{Database, NewProduct};
use crate::error::{Result, SalesDmError};
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;

/// Parse a JSON array of products
pub fn parse_json_products(content: &str) -> Result<Vec<NewProduct>> {
    let products: Vec<NewProduct> = serde_json::from_str(content)?;
    Ok(products)
}

/// Parse CSV with a header row containing `name`, `price` and optionally
/// `description` and `id`
pub fn parse_csv_products(content: &str) -> Result<Vec<NewProduct>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut products = Vec::new();
    for (row_num, record) in reader.deserialize::<NewProduct>().enumerate() {
        let product = record.map_err(|e| {
            SalesDmError::Parse(format!("Failed to parse CSV row {}: {}", row_num + 1, e))
        })?;
        products.push(product);
    }
    Ok(products)
}

/// Read and parse a `.json` or `.csv` catalog file
pub fn read_products_file(path: &Path) -> Result<Vec<NewProduct>> {
    let content = fs::read_to_string(path).map_err(|e| {
        SalesDmError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read catalog file {:?}: {}", path, e),
        ))
    })?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("json") => parse_json_products(&content),
        Some("csv") => parse_csv_products(&content),
        other => Err(SalesDmError::InvalidInput(format!(
            "unsupported catalog format: {}",
            other.unwrap_or("<none>")
        ))),
    }
}

impl Database {
    /// Import products from a `.json` or `.csv` file, returning the count
    pub fn import_products(&mut self, path: &Path) -> Result<usize> {
        let products = read_products_file(path)?;
        let count = self.insert_products(&products)?;
        tracing::info!("Imported {} products from {}", count, path.display());
        Ok(count)
    }

    /// Replace the catalog with the contents of a file.
    ///
    /// The file is parsed before anything is deleted, so a bad file leaves
    /// the existing catalog untouched. Returns `(removed, imported)`.
    pub fn replace_products_from_file(&mut self, path: &Path) -> Result<(usize, usize)> {
        let products = read_products_file(path)?;
        let (removed, count) = self.replace_products(&products)?;
        tracing::info!(
            "Replaced {} products with {} from {}",
            removed,
            count,
            path.display()
        );
        Ok((removed, count))
    }
}
