//! HTTP API: configuration, routing, middleware and the product service.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
