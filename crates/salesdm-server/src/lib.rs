//! # salesdm-server
//!
//! HTTP surface for the salesdm direct-message simulator: `/simulate_dm`,
//! `/health` and `/metrics`.

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod rate_limit;

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Extension, Router};
use salesdm_core::{
    Database, RetrievalConfig, Result, SalesDmError, SalesResponder, ServerConfig,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody, INTERNAL_DETAIL};
pub use metrics::{MetricsReport, ServiceMetrics};
pub use rate_limit::IpLimiter;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Product catalog; SQLite access happens on the blocking pool
    pub catalog: Arc<Mutex<Database>>,
    /// Reply generator wrapping the LLM client
    pub responder: Arc<SalesResponder>,
    pub retrieval: RetrievalConfig,
    pub metrics: Arc<ServiceMetrics>,
}

impl AppState {
    pub fn new(catalog: Database, responder: SalesResponder, retrieval: RetrievalConfig) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
            responder: Arc::new(responder),
            retrieval,
            metrics: Arc::new(ServiceMetrics::new()),
        }
    }
}

/// Build the router with rate limiting on `/simulate_dm`, CORS and tracing.
///
/// The limiter is handed to `simulate_dm` as an extension and consulted
/// after the body validates, so malformed requests never spend budget.
pub fn router(state: AppState, config: &ServerConfig) -> Result<Router> {
    let limiter = IpLimiter::new(config.parsed_rate_limit()?);

    let limited = Router::new()
        .route("/simulate_dm", post(handlers::simulate_dm))
        .layer(Extension(limiter));

    let open = Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics));

    Ok(Router::new()
        .merge(limited)
        .merge(open)
        .layer(cors_layer(&config.allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// CORS for GET/POST with credentials. No configured origins (or `*`)
/// mirrors the caller's origin.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(AllowOrigin::mirror_request()));
    }

    let values = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| SalesDmError::Config(format!("invalid origin {:?}: {}", origin, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(values))
}

/// Bind and serve until ctrl-c
pub async fn run_server(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = router(state, config)?;

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .map_err(|e| SalesDmError::Config(format!("invalid bind address {:?}: {}", config.bind_addr, e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("salesdm server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down gracefully");
        }
    })
    .await?;

    Ok(())
}
