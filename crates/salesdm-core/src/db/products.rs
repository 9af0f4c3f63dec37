//! Product catalog operations

use super::schema::FOLD_CASE_FN;
use super::Database;
use crate::error::{Result, SalesDmError};
use chrono::Utc;
use rusqlite::{params, Row, Transaction};
use serde::{Deserialize, Serialize};

/// Product record from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Product to insert; `id` is assigned by SQLite when absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SalesDmError::InvalidInput(
                "product name cannot be empty".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SalesDmError::InvalidInput(format!(
                "invalid price for {:?}: {}",
                self.name, self.price
            )));
        }
        Ok(())
    }
}

fn map_product_row(row: &Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
    })
}

fn insert_all(tx: &Transaction, products: &[NewProduct]) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    let mut stmt = tx.prepare(
        "INSERT INTO products (id, name, description, price, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for product in products {
        stmt.execute(params![
            product.id,
            product.name.trim(),
            product.description.trim(),
            product.price,
            now
        ])?;
    }
    Ok(())
}

impl Database {
    /// Insert a product, returning its id
    pub fn insert_product(&self, product: &NewProduct) -> Result<i64> {
        product.validate()?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO products (id, name, description, price, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                product.id,
                product.name.trim(),
                product.description.trim(),
                product.price,
                now
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert many products atomically, returning the number inserted
    pub fn insert_products(&mut self, products: &[NewProduct]) -> Result<usize> {
        for product in products {
            product.validate()?;
        }

        let tx = self.conn.transaction()?;
        insert_all(&tx, products)?;
        tx.commit()?;

        Ok(products.len())
    }

    /// Swap the whole catalog for `products` in one transaction.
    ///
    /// Returns `(removed, inserted)`. Nothing is deleted if any product is
    /// invalid or an insert fails.
    pub fn replace_products(&mut self, products: &[NewProduct]) -> Result<(usize, usize)> {
        for product in products {
            product.validate()?;
        }

        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM products", [])?;
        insert_all(&tx, products)?;
        tx.commit()?;

        Ok((removed, products.len()))
    }

    /// Get product by id
    pub fn get_product(&self, id: i64) -> Result<Option<Product>> {
        let result = self.conn.query_row(
            "SELECT id, name, description, price FROM products WHERE id = ?1",
            params![id],
            map_product_row,
        );
        match result {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List products ordered by id
    pub fn list_products(&self, limit: usize) -> Result<Vec<Product>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, price FROM products ORDER BY id LIMIT ?1",
        )?;
        let products = stmt
            .query_map(params![limit as i64], map_product_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Case-insensitive substring search over name and description.
    ///
    /// Name matches rank ahead of description-only matches; ties break by id.
    pub fn search_products(&self, term: &str, limit: usize) -> Result<Vec<Product>> {
        let needle = term.to_lowercase();
        let sql = format!(
            "SELECT id, name, description, price
             FROM products
             WHERE instr({f}(name), ?1) > 0 OR instr({f}(description), ?1) > 0
             ORDER BY CASE WHEN instr({f}(name), ?1) > 0 THEN 0 ELSE 1 END, id
             LIMIT ?2",
            f = FOLD_CASE_FN
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let products = stmt
            .query_map(params![needle, limit as i64], map_product_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::trace!("search_products({:?}) -> {} rows", term, products.len());
        Ok(products)
    }

    /// Count catalog products
    pub fn count_products(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup();
        let id = db
            .insert_product(&NewProduct::new("هدفون سونی", "بی‌سیم", 4_500_000.0))
            .unwrap();

        let product = db.get_product(id).unwrap().unwrap();
        assert_eq!(product.name, "هدفون سونی");
        assert_eq!(product.price, 4_500_000.0);
        assert!(db.get_product(id + 100).unwrap().is_none());
    }

    #[test]
    fn test_insert_with_explicit_id() {
        let db = setup();
        let id = db
            .insert_product(&NewProduct::new("Laptop", "", 10.0).with_id(42))
            .unwrap();
        assert_eq!(id, 42);
    }

    #[test]
    fn test_rejects_negative_price() {
        let db = setup();
        let err = db
            .insert_product(&NewProduct::new("Broken", "", -1.0))
            .unwrap_err();
        assert!(matches!(err, SalesDmError::InvalidInput(_)));
        assert_eq!(db.count_products().unwrap(), 0);
    }

    #[test]
    fn test_rejects_empty_name() {
        let db = setup();
        assert!(db.insert_product(&NewProduct::new("  ", "x", 1.0)).is_err());
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let db = setup();
        db.insert_product(&NewProduct::new("Phone case", "fits Galaxy S24", 5.0))
            .unwrap();
        db.insert_product(&NewProduct::new("Galaxy S24", "Samsung flagship", 900.0))
            .unwrap();
        db.insert_product(&NewProduct::new("Charger", "USB-C", 20.0))
            .unwrap();

        let results = db.search_products("galaxy", 10).unwrap();
        let names: Vec<_> = results.iter().map(|p| p.name.as_str()).collect();
        // name match ranks first even with a higher id
        assert_eq!(names, vec!["Galaxy S24", "Phone case"]);
    }

    #[test]
    fn test_search_is_case_insensitive_for_non_ascii() {
        let db = setup();
        db.insert_product(&NewProduct::new("ÜBER Kabel", "", 1.0))
            .unwrap();
        assert_eq!(db.search_products("über", 5).unwrap().len(), 1);
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let db = setup();
        db.insert_product(&NewProduct::new("Discount 50%", "", 1.0))
            .unwrap();
        db.insert_product(&NewProduct::new("Plain", "", 1.0)).unwrap();
        assert_eq!(db.search_products("%", 5).unwrap().len(), 1);
        assert_eq!(db.search_products("_", 5).unwrap().len(), 0);
    }

    #[test]
    fn test_search_respects_limit() {
        let db = setup();
        for i in 0..8 {
            db.insert_product(&NewProduct::new(format!("کابل {}", i), "", 1.0))
                .unwrap();
        }
        assert_eq!(db.search_products("کابل", 3).unwrap().len(), 3);
    }

    #[test]
    fn test_insert_products_is_atomic() {
        let mut db = setup();
        let batch = vec![
            NewProduct::new("A", "", 1.0).with_id(1),
            NewProduct::new("B", "", 2.0).with_id(1),
        ];
        assert!(db.insert_products(&batch).is_err());
        assert_eq!(db.count_products().unwrap(), 0);
    }

    #[test]
    fn test_list_and_replace() {
        let mut db = setup();
        db.insert_products(&[
            NewProduct::new("A", "", 1.0),
            NewProduct::new("B", "", 2.0),
        ])
        .unwrap();
        assert_eq!(db.list_products(10).unwrap().len(), 2);

        let (removed, inserted) = db
            .replace_products(&[NewProduct::new("C", "", 3.0)])
            .unwrap();
        assert_eq!((removed, inserted), (2, 1));
        let names: Vec<_> = db
            .list_products(10)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["C"]);
    }

    #[test]
    fn test_failed_replace_keeps_catalog() {
        let mut db = setup();
        db.insert_products(&[
            NewProduct::new("A", "", 1.0).with_id(1),
            NewProduct::new("B", "", 2.0).with_id(2),
        ])
        .unwrap();

        let invalid = vec![NewProduct::new("", "", 1.0)];
        assert!(matches!(
            db.replace_products(&invalid),
            Err(SalesDmError::InvalidInput(_))
        ));
        assert_eq!(db.count_products().unwrap(), 2);

        let conflicting = vec![
            NewProduct::new("X", "", 1.0).with_id(5),
            NewProduct::new("Y", "", 1.0).with_id(5),
        ];
        assert!(db.replace_products(&conflicting).is_err());
        assert_eq!(db.count_products().unwrap(), 2);
    }
}
