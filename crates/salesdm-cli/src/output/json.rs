//! JSON output formatter

use salesdm_core::Product;

pub fn format_products(products: &[Product]) -> String {
    serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string()) + "\n"
}

pub fn format_retrieval(keywords: &[String], products: &[Product]) -> String {
    let output = serde_json::json!({
        "keywords": keywords,
        "products": products,
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string()) + "\n"
}
