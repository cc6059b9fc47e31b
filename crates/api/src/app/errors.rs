use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use catalog_core::{DomainError, EntityError};

use crate::app::dto::{EnvelopeStatus, ErrorBody, ErrorEnvelope, Metadata, QueryError};
use crate::app::services::ServiceError;
use crate::context::RequestContext;

/// Status, code, message and optional detail for a service failure.
///
/// Storage failures never leak their cause to the client.
pub fn classify(err: &ServiceError) -> (StatusCode, String, String, Option<String>) {
    match err {
        ServiceError::Domain(DomainError::ValueObject(e)) => (
            StatusCode::BAD_REQUEST,
            e.code().to_string(),
            e.message().to_string(),
            Some(format!("field: {}", e.kind().field())),
        ),
        ServiceError::Domain(DomainError::Mapping(e)) => (
            StatusCode::BAD_REQUEST,
            "mapping_error".to_string(),
            e.message().to_string(),
            None,
        ),
        ServiceError::Domain(DomainError::Precondition(msg)) => (
            StatusCode::BAD_REQUEST,
            "precondition_failed".to_string(),
            msg.clone(),
            None,
        ),
        ServiceError::Domain(DomainError::Entity(e @ EntityError::NotFound { .. })) => (
            StatusCode::NOT_FOUND,
            "product_not_found".to_string(),
            e.to_string(),
            None,
        ),
        ServiceError::Domain(DomainError::Entity(e @ EntityError::AlreadyExists { .. })) => (
            StatusCode::CONFLICT,
            "product_already_exists".to_string(),
            e.to_string(),
            None,
        ),
        ServiceError::Domain(DomainError::Entity(e @ EntityError::Invalid { .. })) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "domain_error".to_string(),
            e.to_string(),
            None,
        ),
        ServiceError::InvalidSort(property) => (
            StatusCode::BAD_REQUEST,
            "invalid_sort".to_string(),
            format!("cannot sort by {property:?}"),
            None,
        ),
        ServiceError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error".to_string(),
            "an internal error occurred".to_string(),
            None,
        ),
    }
}

pub fn service_error_to_response(ctx: &RequestContext, err: ServiceError) -> Response {
    let (status, code, message, detail) = classify(&err);
    json_error(ctx, status, code, message, detail)
}

pub fn query_error_to_response(ctx: &RequestContext, err: QueryError) -> Response {
    json_error(ctx, StatusCode::BAD_REQUEST, err.code, err.message, None)
}

pub fn json_error(
    ctx: &RequestContext,
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
    detail: Option<String>,
) -> Response {
    (
        status,
        axum::Json(ErrorEnvelope {
            status: EnvelopeStatus::Error,
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                detail,
            },
            metadata: Metadata::now(ctx),
        }),
    )
        .into_response()
}
