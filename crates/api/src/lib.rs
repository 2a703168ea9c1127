//! Delivery Prediction API Server
//!
//! Serves the interactive order form and the JSON prediction endpoint on
//! top of a read-only model runtime.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod rate_limit;
mod routes;

pub use config::AppConfig;
pub use rate_limit::RateLimitConfig;

use model_runtime::ModelRuntime;

/// Application state shared across handlers.
///
/// The runtime is loaded once and never mutated, so handlers share it
/// through a plain `Arc` with no locking.
pub struct AppState {
    /// Model, trained schema, and preprocessor
    pub runtime: ModelRuntime,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state around a loaded runtime
    pub fn new(runtime: ModelRuntime) -> Self {
        Self {
            runtime,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelStatus,
}

/// Loaded-model summary
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub kind: String,
    pub feature_count: usize,
    pub category_map: bool,
}

/// Create the application router; prediction endpoints sit behind the
/// rate limiter, the form and health pages do not.
pub fn create_router(state: Arc<AppState>, rate_limit: &RateLimitConfig) -> Router {
    let governor = rate_limit::create_governor_config(rate_limit);

    let predict_routes = Router::new()
        .route("/predict", post(routes::form::submit_form))
        .route("/api/v1/predict", post(routes::predict::predict))
        .layer(GovernorLayer { config: governor });

    Router::new()
        .route("/", get(routes::form::show_form))
        .route("/api/v1/health", get(health_handler))
        .merge(predict_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelStatus {
            kind: state.runtime.model_kind().to_string(),
            feature_count: state.runtime.feature_count(),
            category_map: state.runtime.has_category_map(),
        },
    };

    Json(response)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown
pub async fn run_server(config: AppConfig, runtime: ModelRuntime) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(runtime));
    let app = create_router(state, &config.rate_limit);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
