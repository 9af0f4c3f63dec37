//! Salesdm Core Library
//!
//! Core functionality for the salesdm direct-message sales assistant.
//!
//! # Features
//! - SQLite product catalog with case-insensitive substring search
//! - Persian keyword extraction with a static stopword table
//! - Keyword-driven product retrieval with deduplication and top-K cap
//! - Bounded prompt context rendering
//! - LLM-backed reply generation that always yields user-facing text

pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod search;

pub use config::{Config, LLMServiceConfig, RateLimit, RetrievalConfig, ServerConfig};
pub use db::{CatalogStore, Database, NewProduct, Product};
pub use error::{Error, Result, SalesDmError};
pub use llm::{HttpLLMClient, LLMClient, SalesResponder};
pub use search::{clean_query, extract_keywords, format_context, format_price, Retriever};

/// Default data directory name
pub const DATA_DIR_NAME: &str = "salesdm";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "salesdm";
