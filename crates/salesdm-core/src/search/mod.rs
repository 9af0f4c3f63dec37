//! Retrieval pipeline
//!
//! Provides:
//! - Query cleaning and Persian keyword extraction
//! - Keyword-driven catalog retrieval with deduplication
//! - Bounded prompt context rendering

mod context;
mod keywords;
mod retriever;

pub use context::{format_context, format_price, NO_PRODUCTS_FOUND};
pub use keywords::{clean_query, extract_keywords, is_stop_word};
pub use retriever::Retriever;
