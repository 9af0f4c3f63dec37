//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use salesdm_core::Product;

/// Format a product listing
pub fn format_products(products: &[Product], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_products(products),
        OutputFormat::Cli => terminal::format_products(products),
    }
}

/// Format the keywords and products produced for one message
pub fn format_retrieval(keywords: &[String], products: &[Product], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_retrieval(keywords, products),
        OutputFormat::Cli => terminal::format_retrieval(keywords, products),
    }
}
