//! `POST /simulate_dm`

use crate::error::ApiError;
use crate::rate_limit::IpLimiter;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Extensions;
use axum::{Extension, Json};
use salesdm_core::{Product, Retriever};
use serde::{Deserialize, Serialize};

/// Upper bound for `sender_id` and `message_id`, in characters
pub const MAX_ID_CHARS: usize = 100;

/// Upper bound for `text`, in characters
pub const MAX_TEXT_CHARS: usize = 500;

/// Length of the message preview written to logs
const LOG_PREVIEW_CHARS: usize = 50;

/// Incoming direct message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DmRequest {
    pub sender_id: String,
    pub message_id: String,
    pub text: String,
}

/// Reply to a direct message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DmResponse {
    pub reply: String,
}

impl DmRequest {
    /// Check field bounds on the raw values, then trim.
    ///
    /// Whitespace-only fields are rejected.
    pub fn validate(self) -> Result<Self, ApiError> {
        Ok(Self {
            sender_id: check_field("sender_id", self.sender_id, MAX_ID_CHARS)?,
            message_id: check_field("message_id", self.message_id, MAX_ID_CHARS)?,
            text: check_field("text", self.text, MAX_TEXT_CHARS)?,
        })
    }
}

fn check_field(name: &str, value: String, max_chars: usize) -> Result<String, ApiError> {
    let len = value.chars().count();
    if len == 0 || len > max_chars {
        return Err(ApiError::Validation(format!(
            "{} must be between 1 and {} characters (got {})",
            name, max_chars, len
        )));
    }

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!(
            "{} cannot be empty or whitespace",
            name
        )));
    }

    Ok(trimmed.to_string())
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

pub async fn simulate_dm(
    State(state): State<AppState>,
    Extension(limiter): Extension<IpLimiter>,
    extensions: Extensions,
    payload: Result<Json<DmRequest>, JsonRejection>,
) -> Result<Json<DmResponse>, ApiError> {
    let Json(request) = payload?;
    let request = request.validate()?;
    limiter.admit(IpLimiter::client_ip(&extensions))?;
    state.metrics.record_request();

    tracing::info!(
        "Processing DM {} from {}: {}...",
        request.message_id,
        request.sender_id,
        preview(&request.text)
    );

    let products = retrieve(&state, request.text.clone()).await?;
    tracing::info!("Retrieved {} products for query", products.len());

    let reply = state
        .responder
        .generate_response(&request.text, &products)
        .await;

    tracing::info!("Generated response for {}", request.sender_id);
    Ok(Json(DmResponse { reply }))
}

/// Run retrieval on the blocking pool against the shared catalog
async fn retrieve(state: &AppState, text: String) -> Result<Vec<Product>, ApiError> {
    let catalog = state.catalog.clone();
    let top_k = state.retrieval.top_k;

    let products = tokio::task::spawn_blocking(move || {
        Retriever::new(&*catalog, top_k).retrieve_relevant_products(&text)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("retrieval task failed: {}", e)))??;

    Ok(products)
}
