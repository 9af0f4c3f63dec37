//! HTTP error mapping

use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use salesdm_core::SalesDmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Detail returned to clients when a request fails on the server side
pub const INTERNAL_DETAIL: &str = "خطا در پردازش درخواست";

/// Error body shared by every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Handler-level errors with HTTP status mapping
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Rate limit exceeded: {limit}")]
    RateLimited { limit: String, retry_after: Duration },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(detail) => {
                tracing::warn!("Rejected request: {}", detail);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody { detail })).into_response()
            }
            ApiError::RateLimited { limit, retry_after } => {
                let detail = format!("Rate limit exceeded: {}", limit);
                let mut response =
                    (StatusCode::TOO_MANY_REQUESTS, Json(ErrorBody { detail })).into_response();
                let secs = retry_after.as_secs().max(1);
                if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
                response
            }
            ApiError::Internal(message) => {
                tracing::error!("Error processing request: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        detail: INTERNAL_DETAIL.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<SalesDmError> for ApiError {
    fn from(e: SalesDmError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
