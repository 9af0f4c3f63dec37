//! Terminal output formatter

use salesdm_core::{format_price, Product};

pub fn format_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products\n".to_string();
    }

    let mut output = String::new();
    for product in products {
        output.push_str(&format!(
            "#{:<4} {}  ({} تومان)\n",
            product.id,
            product.name,
            format_price(product.price)
        ));
        if !product.description.is_empty() {
            output.push_str(&format!("      {}\n", product.description));
        }
    }
    output
}

pub fn format_retrieval(keywords: &[String], products: &[Product]) -> String {
    let mut output = format!("Keywords: {}\n\n", keywords.join(", "));
    output.push_str(&format_products(products));
    output
}
