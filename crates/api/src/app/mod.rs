//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: product service and store selection
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response envelope and query parsing
//! - `errors.rs`: error → status/code translation

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use catalog_infra::RepositoryError;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> Result<Router, RepositoryError> {
    let services = services::build_services(config).await?;
    Ok(router(Arc::new(services)))
}

/// Router over an already-wired service.
pub fn router(services: Arc<services::ProductService>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::correlation_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}
