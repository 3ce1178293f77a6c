//! Hospital Service
//!
//! JSON-over-HTTP backend for user signup, the doctor directory and patient
//! appointment schedules, backed by a MongoDB document store.
//!
//! ## Modules
//!
//! - `api`: axum handlers mounted under `/api`
//! - `config`: environment-driven settings
//! - `db`: the `HospitalStore` seam and its MongoDB / in-memory backends
//! - `error`: `AppError` and its HTTP mapping
//! - `models`: stored documents and request bodies
//! - `security`: password hashing
//! - `services`: per-resource business logic
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod security;
pub mod services;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use db::HospitalStore;
pub use error::{AppError, ErrorKind, Result};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HospitalStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn HospitalStore>, config: Config) -> Self {
        Self { store, config }
    }
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api::routes(state.config.expose_patient_schedule))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if config.cors_allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

async fn health_check() -> &'static str {
    "OK"
}
