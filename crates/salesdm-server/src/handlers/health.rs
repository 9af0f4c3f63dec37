//! `GET /health` and `GET /metrics`

use crate::metrics::MetricsReport;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use salesdm_core::{CatalogStore, Result as CoreResult, SalesDmError};
use serde::Serialize;

/// Body of `GET /health`; always served with 200
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HealthReport {
    Healthy {
        status: &'static str,
        database: &'static str,
        products_count: usize,
        uptime_seconds: f64,
        requests_processed: u64,
    },
    Unhealthy {
        status: &'static str,
        error: String,
    },
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    match count_products(&state).await {
        Ok(products_count) => Json(HealthReport::Healthy {
            status: "healthy",
            database: "connected",
            products_count,
            uptime_seconds: state.metrics.uptime_seconds(),
            requests_processed: state.metrics.requests_processed(),
        }),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Json(HealthReport::Unhealthy {
                status: "unhealthy",
                error: e.to_string(),
            })
        }
    }
}

async fn count_products(state: &AppState) -> CoreResult<usize> {
    let catalog = state.catalog.clone();
    tokio::task::spawn_blocking(move || catalog.count_products())
        .await
        .map_err(|e| SalesDmError::Catalog(format!("health task failed: {}", e)))?
}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    let llm = state.responder.client().metrics();
    Json(state.metrics.report(llm))
}
