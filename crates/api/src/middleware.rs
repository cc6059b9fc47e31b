use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::context::RequestContext;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

const MAX_CORRELATION_ID_LEN: usize = 128;

/// Attach a [`RequestContext`] to every request and echo its correlation id
/// on the response.
///
/// A caller-supplied `x-correlation-id` is reused when it is printable ASCII
/// of reasonable length; otherwise a new id is generated. Everything the
/// request logs happens inside a `request` span carrying the id.
pub async fn correlation_middleware(mut req: Request, next: Next) -> Response {
    let ctx = extract_correlation_id(req.headers())
        .map(RequestContext::new)
        .unwrap_or_else(RequestContext::generate);

    let span = tracing::info_span!(
        "request",
        correlation_id = %ctx.correlation_id(),
        method = %req.method(),
        path = %req.uri().path(),
    );

    req.extensions_mut().insert(ctx.clone());
    let mut res = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(ctx.correlation_id()) {
        res.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    res
}

fn extract_correlation_id(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(CORRELATION_ID_HEADER)?.to_str().ok()?.trim();
    if raw.is_empty()
        || raw.len() > MAX_CORRELATION_ID_LEN
        || !raw.chars().all(|c| c.is_ascii_graphic())
    {
        return None;
    }
    Some(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(CORRELATION_ID_HEADER, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn supplied_id_is_reused() {
        assert_eq!(
            extract_correlation_id(&headers("abc-123")).as_deref(),
            Some("abc-123")
        );
    }

    #[test]
    fn missing_or_unusable_ids_are_ignored() {
        assert_eq!(extract_correlation_id(&HeaderMap::new()), None);
        assert_eq!(extract_correlation_id(&headers("   ")), None);
        assert_eq!(extract_correlation_id(&headers("has space")), None);
        assert_eq!(extract_correlation_id(&headers(&"x".repeat(129))), None);
    }
}
