use axum::Router;

pub mod products;
pub mod system;

/// Router for the versioned product API.
pub fn router() -> Router {
    Router::new().nest("/api/v1/products", products::router())
}
