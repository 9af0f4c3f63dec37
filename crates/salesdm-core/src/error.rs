//! Error types for salesdm

use thiserror::Error;

/// Result type alias using SalesDmError
pub type Result<T> = std::result::Result<T, SalesDmError>;

/// Error type alias for convenience
pub type Error = SalesDmError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for salesdm
#[derive(Debug, Error)]
pub enum SalesDmError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("LLM request timed out after {0}s")]
    LlmTimeout(u64),

    #[error("LLM service error (HTTP {status}): {body}")]
    LlmStatus { status: u16, body: String },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl SalesDmError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ProductNotFound(_) => exit_codes::NOT_FOUND,
            Self::InvalidInput(_) | Self::Config(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    /// Whether this error came from the transport or status layer of the LLM call
    pub fn is_llm_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::LlmStatus { .. })
    }
}
