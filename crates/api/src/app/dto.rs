//! Response envelope and query-string parsing.
//!
//! Product request/response bodies themselves live in `catalog_products::dto`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use catalog_core::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use catalog_core::{PageRequest, SortDirection, SortOrder};
use catalog_infra::ProductSortField;

use crate::context::RequestContext;

// -------------------------
// Envelope
// -------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub timestamp: String,
    pub correlation_id: String,
}

impl Metadata {
    pub fn now(ctx: &RequestContext) -> Self {
        Self::at(ctx, Utc::now())
    }

    pub fn at(ctx: &RequestContext, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            correlation_id: ctx.correlation_id().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope<T> {
    pub status: EnvelopeStatus,
    pub data: T,
    pub metadata: Metadata,
}

impl<T: Serialize> SuccessEnvelope<T> {
    pub fn new(ctx: &RequestContext, data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data,
            metadata: Metadata::now(ctx),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub status: EnvelopeStatus,
    pub error: ErrorBody,
    pub metadata: Metadata,
}

// -------------------------
// Query parsing
// -------------------------

/// A rejected query string: `(code, message)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub code: &'static str,
    pub message: String,
}

impl QueryError {
    fn pagination(message: impl Into<String>) -> Self {
        Self {
            code: "invalid_pagination",
            message: message.into(),
        }
    }

    fn sort(message: impl Into<String>) -> Self {
        Self {
            code: "invalid_sort",
            message: message.into(),
        }
    }
}

/// Parse `page`, `size` and repeatable `sort=field[,asc|desc]` parameters.
///
/// Unknown parameters are ignored. Sort fields are checked against
/// [`ProductSortField`] here so a bad field never reaches the repository.
pub fn parse_page_request(raw_query: Option<&str>) -> Result<PageRequest, QueryError> {
    let mut page: u32 = 0;
    let mut size: u32 = DEFAULT_PAGE_SIZE;
    let mut sort = Vec::new();

    for (key, value) in url::form_urlencoded::parse(raw_query.unwrap_or("").as_bytes()) {
        match key.as_ref() {
            "page" => {
                page = value
                    .trim()
                    .parse()
                    .map_err(|_| QueryError::pagination(format!("page must be a non-negative integer, got {value:?}")))?;
            }
            "size" => {
                size = value
                    .trim()
                    .parse()
                    .ok()
                    .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
                    .ok_or_else(|| {
                        QueryError::pagination(format!(
                            "size must be between 1 and {MAX_PAGE_SIZE}, got {value:?}"
                        ))
                    })?;
            }
            "sort" => sort.push(parse_sort(&value)?),
            _ => {}
        }
    }

    Ok(PageRequest::new(page, size).with_sort(sort))
}

fn parse_sort(value: &str) -> Result<SortOrder, QueryError> {
    let mut parts = value.split(',').map(str::trim);
    let property = parts.next().unwrap_or_default();
    if ProductSortField::parse(property).is_none() {
        let allowed = ProductSortField::ALL
            .iter()
            .map(|f| f.property())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(QueryError::sort(format!(
            "cannot sort by {property:?}; allowed: {allowed}"
        )));
    }

    let direction = match parts.next() {
        None | Some("") => SortDirection::Asc,
        Some(d) => SortDirection::parse(d)
            .ok_or_else(|| QueryError::sort(format!("sort direction must be asc or desc, got {d:?}")))?,
    };
    if parts.next().is_some() {
        return Err(QueryError::sort(format!("malformed sort parameter {value:?}")));
    }

    Ok(SortOrder {
        property: property.to_string(),
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_query_is_absent() {
        let req = parse_page_request(None).unwrap();
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn page_size_and_repeated_sort_are_read() {
        let req = parse_page_request(Some("page=2&size=5&sort=price,desc&sort=name")).unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(req.size, 5);
        assert_eq!(
            req.sort,
            vec![SortOrder::desc("price"), SortOrder::asc("name")]
        );
    }

    #[test]
    fn encoded_comma_is_accepted() {
        let req = parse_page_request(Some("sort=createdAt%2CDESC")).unwrap();
        assert_eq!(req.sort, vec![SortOrder::desc("createdAt")]);
    }

    #[test]
    fn out_of_range_size_is_rejected() {
        for q in ["size=0", "size=101", "size=ten", "page=-1"] {
            let err = parse_page_request(Some(q)).unwrap_err();
            assert_eq!(err.code, "invalid_pagination", "query {q}");
        }
    }

    #[test]
    fn unknown_sort_field_or_direction_is_rejected() {
        for q in ["sort=password", "sort=name,sideways", "sort=name,asc,extra"] {
            let err = parse_page_request(Some(q)).unwrap_err();
            assert_eq!(err.code, "invalid_sort", "query {q}");
        }
    }

    #[test]
    fn metadata_uses_rfc3339_and_correlation_id() {
        let ctx = RequestContext::new("corr-1");
        let at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = serde_json::to_value(Metadata::at(&ctx, at)).unwrap();
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00.000Z");
        assert_eq!(json["correlationId"], "corr-1");
    }
}
