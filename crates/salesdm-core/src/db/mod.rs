//! Database layer for salesdm
//!
//! Provides SQLite-based storage with:
//! - Product catalog with Unicode case-insensitive substring search
//! - JSON/CSV catalog import
//! - Built-in sample catalog seeding

mod import;
mod products;
mod schema;
mod seed;

pub use products::{NewProduct, Product};
pub use schema::Database;
pub use seed::default_catalog;

use crate::error::{Result, SalesDmError};
use std::path::PathBuf;
use std::sync::Mutex;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::DATA_DIR_NAME)
            .join("catalog.sqlite")
    }
}

/// Query capability the retriever needs from a product catalog
pub trait CatalogStore {
    /// Products whose name or description contains `term`, at most `limit`
    fn search_products(&self, term: &str, limit: usize) -> Result<Vec<Product>>;

    /// Total number of products
    fn count_products(&self) -> Result<usize>;
}

impl CatalogStore for Database {
    fn search_products(&self, term: &str, limit: usize) -> Result<Vec<Product>> {
        Database::search_products(self, term, limit)
    }

    fn count_products(&self) -> Result<usize> {
        Database::count_products(self)
    }
}

/// Shared handle used by concurrent request tasks
impl CatalogStore for Mutex<Database> {
    fn search_products(&self, term: &str, limit: usize) -> Result<Vec<Product>> {
        let db = self
            .lock()
            .map_err(|_| SalesDmError::Catalog("database lock poisoned".to_string()))?;
        db.search_products(term, limit)
    }

    fn count_products(&self) -> Result<usize> {
        let db = self
            .lock()
            .map_err(|_| SalesDmError::Catalog("database lock poisoned".to_string()))?;
        db.count_products()
    }
}
