//! Keyword-driven product retrieval

use super::keywords::{clean_query, extract_keywords};
use crate::db::{CatalogStore, Product};
use crate::error::Result;
use std::collections::HashSet;

/// Retrieves catalog products relevant to a customer message
pub struct Retriever<'a> {
    catalog: &'a dyn CatalogStore,
    top_k: usize,
}

impl<'a> Retriever<'a> {
    pub fn new(catalog: &'a dyn CatalogStore, top_k: usize) -> Self {
        Self { catalog, top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Query the catalog once per distinct keyword and merge results.
    ///
    /// Products keep the position of the first keyword that surfaced them.
    /// When no keyword matches anything, the whole cleaned query is searched
    /// once as a fallback. Catalog errors propagate unchanged.
    pub fn retrieve_relevant_products(&self, user_query: &str) -> Result<Vec<Product>> {
        let cleaned = clean_query(user_query);
        let keywords = extract_keywords(&cleaned);
        tracing::debug!("Extracted keywords {:?} from {:?}", keywords, cleaned);

        let mut results: Vec<Product> = Vec::new();
        let mut seen: HashSet<i64> = HashSet::new();
        let mut searched: HashSet<&str> = HashSet::new();

        for keyword in &keywords {
            if !searched.insert(keyword.as_str()) {
                continue;
            }
            for product in self.catalog.search_products(keyword, self.top_k)? {
                if seen.insert(product.id) {
                    results.push(product);
                }
            }
        }

        if results.is_empty() {
            tracing::debug!("No keyword matches, falling back to full query search");
            results = self.catalog.search_products(&cleaned, self.top_k)?;
        }

        results.truncate(self.top_k);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SalesDmError;
    use proptest::prelude::*;
    use std::cell::RefCell;

    /// In-memory catalog that records every search term
    struct FakeCatalog {
        products: Vec<Product>,
        calls: RefCell<Vec<String>>,
        fail: bool,
        /// Phrase-level hit that ignores `limit`, like a catalog with
        /// different phrase semantics
        scripted: Option<(String, Vec<Product>)>,
    }

    impl FakeCatalog {
        fn new(products: Vec<Product>) -> Self {
            Self {
                products,
                calls: RefCell::new(Vec::new()),
                fail: false,
                scripted: None,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Vec::new())
            }
        }
    }

    impl CatalogStore for FakeCatalog {
        fn search_products(&self, term: &str, limit: usize) -> Result<Vec<Product>> {
            self.calls.borrow_mut().push(term.to_string());
            if self.fail {
                return Err(SalesDmError::Catalog("connection refused".into()));
            }
            if let Some((phrase, hits)) = &self.scripted {
                if phrase == term {
                    return Ok(hits.clone());
                }
            }
            Ok(self
                .products
                .iter()
                .filter(|p| p.name.contains(term) || p.description.contains(term))
                .take(limit)
                .cloned()
                .collect())
        }

        fn count_products(&self) -> Result<usize> {
            Ok(self.products.len())
        }
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            price: 1000.0,
        }
    }

    #[test]
    fn test_phone_price_question_finds_product_first() {
        let catalog = FakeCatalog::new(vec![
            product(1, "هدفون سونی"),
            product(2, "گوشی سامسونگ گلکسی"),
            product(3, "تبلت سامسونگ"),
        ]);
        let retriever = Retriever::new(&catalog, 5);

        let results = retriever
            .retrieve_relevant_products("گوشی سامسونگ چنده؟")
            .unwrap();

        assert_eq!(results[0].name, "گوشی سامسونگ گلکسی");
        let ids: Vec<i64> = results.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(*catalog.calls.borrow(), vec!["گوشی", "سامسونگ"]);
    }

    #[test]
    fn test_deduplicates_across_keywords() {
        let catalog = FakeCatalog::new(vec![product(1, "لپ تاپ ایسوس ویووبوک")]);
        let retriever = Retriever::new(&catalog, 5);

        let results = retriever
            .retrieve_relevant_products("ایسوس ویووبوک")
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_repeated_keyword_searched_once() {
        let catalog = FakeCatalog::new(vec![product(1, "کابل شارژ")]);
        let retriever = Retriever::new(&catalog, 5);

        let results = retriever
            .retrieve_relevant_products("کابل کابل کابل")
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(*catalog.calls.borrow(), vec!["کابل"]);
    }

    #[test]
    fn test_caps_at_top_k() {
        let products = (1..=20).map(|i| product(i, "کابل شارژ")).collect();
        let catalog = FakeCatalog::new(products);
        let retriever = Retriever::new(&catalog, 5);

        let results = retriever.retrieve_relevant_products("کابل شارژ").unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(
            results.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_stopword_only_query_searches_cleaned_query_twice() {
        let catalog = FakeCatalog::new(vec![product(1, "هدفون")]);
        let retriever = Retriever::new(&catalog, 5);

        let results = retriever.retrieve_relevant_products("سلام!").unwrap();
        // the only keyword is the cleaned query; the fallback repeats it
        assert!(results.is_empty());
        assert_eq!(*catalog.calls.borrow(), vec!["سلام", "سلام"]);
    }

    #[test]
    fn test_fallback_results_used_as_is() {
        let mut catalog = FakeCatalog::new(Vec::new());
        catalog.scripted = Some((
            "گوشی تاشو".to_string(),
            (1..=9).map(|i| product(i, "Galaxy Z Fold")).collect(),
        ));
        let retriever = Retriever::new(&catalog, 3);

        let results = retriever.retrieve_relevant_products("گوشی تاشو!").unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(
            *catalog.calls.borrow(),
            vec!["گوشی", "تاشو", "گوشی تاشو"]
        );
    }

    #[test]
    fn test_fallback_not_used_when_keywords_match() {
        let catalog = FakeCatalog::new(vec![product(1, "پاوربانک انکر")]);
        let retriever = Retriever::new(&catalog, 5);

        retriever
            .retrieve_relevant_products("پاوربانک موجوده؟")
            .unwrap();
        assert_eq!(*catalog.calls.borrow(), vec!["پاوربانک", "موجوده"]);
    }

    #[test]
    fn test_no_matches_anywhere() {
        let catalog = FakeCatalog::new(vec![product(1, "هدفون")]);
        let retriever = Retriever::new(&catalog, 5);

        let results = retriever
            .retrieve_relevant_products("یخچال ساید بای ساید")
            .unwrap();
        assert!(results.is_empty());
        // every keyword, then one fallback with the whole cleaned query
        assert_eq!(
            catalog.calls.borrow().last().map(String::as_str),
            Some("یخچال ساید بای ساید")
        );
    }

    #[test]
    fn test_catalog_errors_propagate() {
        let catalog = FakeCatalog::failing();
        let retriever = Retriever::new(&catalog, 5);

        let err = retriever
            .retrieve_relevant_products("گوشی سامسونگ")
            .unwrap_err();
        assert!(matches!(err, SalesDmError::Catalog(_)));
        assert_eq!(catalog.calls.borrow().len(), 1);
    }

    proptest! {
        #[test]
        fn prop_results_unique_and_bounded(
            names in proptest::collection::vec(
                proptest::sample::select(vec!["گوشی سامسونگ", "گوشی اپل", "هدفون سامسونگ", "کابل"]),
                0..30,
            ),
            query in proptest::sample::select(vec![
                "گوشی سامسونگ", "سامسونگ اپل کابل", "هدفون", "سلام", "کابل کابل کابل",
            ]),
            top_k in 1usize..8,
        ) {
            let products = names
                .iter()
                .enumerate()
                .map(|(i, n)| product(i as i64, n))
                .collect();
            let catalog = FakeCatalog::new(products);
            let retriever = Retriever::new(&catalog, top_k);

            let first = retriever.retrieve_relevant_products(query).unwrap();
            let second = retriever.retrieve_relevant_products(query).unwrap();

            let ids: HashSet<i64> = first.iter().map(|p| p.id).collect();
            prop_assert_eq!(ids.len(), first.len());
            prop_assert!(first.len() <= top_k);
            prop_assert_eq!(first, second);
        }
    }
}
