use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, RawQuery, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use catalog_products::{CreateProductRequest, ProductId, UpdateProductRequest};

use crate::app::dto::{SuccessEnvelope, parse_page_request};
use crate::app::errors;
use crate::app::services::{ProductService, ServiceError};
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn create_product(
    Extension(services): Extension<Arc<ProductService>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<Option<CreateProductRequest>>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return malformed(&ctx, rejection),
    };

    match services.create(&ctx, body.as_ref()).await {
        Ok(product) => (StatusCode::CREATED, Json(SuccessEnvelope::new(&ctx, product))).into_response(),
        Err(e) => errors::service_error_to_response(&ctx, e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<ProductService>>,
    Extension(ctx): Extension<RequestContext>,
    RawQuery(query): RawQuery,
) -> Response {
    let page = match parse_page_request(query.as_deref()) {
        Ok(p) => p,
        Err(e) => return errors::query_error_to_response(&ctx, e),
    };

    match services.list(&ctx, &page).await {
        Ok(products) => (StatusCode::OK, Json(SuccessEnvelope::new(&ctx, products))).into_response(),
        Err(e) => errors::service_error_to_response(&ctx, e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<ProductService>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(e) => return errors::service_error_to_response(&ctx, e),
    };

    match services.get(&ctx, &id).await {
        Ok(product) => (StatusCode::OK, Json(SuccessEnvelope::new(&ctx, product))).into_response(),
        Err(e) => errors::service_error_to_response(&ctx, e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<ProductService>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    body: Result<Json<Option<UpdateProductRequest>>, JsonRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(e) => return errors::service_error_to_response(&ctx, e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return malformed(&ctx, rejection),
    };

    match services.update(&ctx, id, body.as_ref()).await {
        Ok(product) => (StatusCode::OK, Json(SuccessEnvelope::new(&ctx, product))).into_response(),
        Err(e) => errors::service_error_to_response(&ctx, e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<ProductService>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(e) => return errors::service_error_to_response(&ctx, e),
    };

    match services.delete(&ctx, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(&ctx, e),
    }
}

fn parse_id(raw: String) -> Result<ProductId, ServiceError> {
    ProductId::new(raw).map_err(ServiceError::from)
}

fn malformed(ctx: &RequestContext, rejection: JsonRejection) -> Response {
    tracing::warn!(
        correlation_id = %ctx.correlation_id(),
        error = %rejection.body_text(),
        "malformed request body"
    );
    errors::json_error(
        ctx,
        StatusCode::BAD_REQUEST,
        "malformed_request",
        "request body is not valid JSON for this endpoint",
        Some(rejection.body_text()),
    )
}
