use url::Url;

use catalog_core::{DomainError, DomainResult, ValueObject, ValueObjectKind};

use super::is_blank;

/// Placeholder used when no image URL is supplied.
pub const DEFAULT_IMAGE_URL: &str = "https://via.placeholder.com/150";

/// Absolute `https` URL of the product image.
///
/// Absent or blank input falls back to [`DEFAULT_IMAGE_URL`] instead of failing.
/// Anything else must start with a lowercase `https://` scheme and carry a
/// non-empty host; the original string is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(value: Option<String>) -> DomainResult<Self> {
        match value {
            Some(v) if !is_blank(&v) => Self::parse(v),
            _ => Ok(Self::default_url()),
        }
    }

    fn parse(raw: String) -> DomainResult<Self> {
        if is_valid_https_url(&raw) {
            Ok(Self(raw))
        } else {
            Err(DomainError::invalid(
                ValueObjectKind::ImageUrl,
                format!("Invalid image URL: {raw}"),
            ))
        }
    }

    pub fn default_url() -> Self {
        Self(DEFAULT_IMAGE_URL.to_string())
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_IMAGE_URL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ImageUrl {
    fn default() -> Self {
        Self::default_url()
    }
}

impl ValueObject for ImageUrl {}

// `Url::parse` lowercases the scheme and tolerates surrounding spaces, so the
// raw prefix and whitespace are checked before handing off to it.
fn is_valid_https_url(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) || !raw.starts_with("https://") {
        return false;
    }
    match Url::parse(raw) {
        Ok(url) => url.scheme() == "https" && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_empty_and_blank_use_default() {
        let default = ImageUrl::default_url();
        assert_eq!(ImageUrl::new(None).unwrap(), default);
        assert_eq!(ImageUrl::new(Some(String::new())).unwrap(), default);
        assert_eq!(ImageUrl::new(Some("   ".to_string())).unwrap(), default);
        assert_eq!(default.as_str(), DEFAULT_IMAGE_URL);
        assert!(default.is_default());
    }

    #[test]
    fn accepts_https_with_host() {
        let url = ImageUrl::new(Some("https://example.com/x.jpg".to_string())).unwrap();
        assert_eq!(url.as_str(), "https://example.com/x.jpg");
        assert!(!url.is_default());
    }

    #[test]
    fn keeps_query_and_port_verbatim() {
        let raw = "https://cdn.example.com:8443/img/a.png?w=200";
        assert_eq!(ImageUrl::new(Some(raw.to_string())).unwrap().as_str(), raw);
    }

    #[test]
    fn rejects_other_schemes_and_malformed_input() {
        for raw in [
            "http://example.com/x.jpg",
            "ftp://example.com/x.jpg",
            "HTTPS://example.com/x.jpg",
            "https:example.com",
            "https://",
            "not a url",
            "example.com/x.jpg",
            " https://example.com/x.jpg",
        ] {
            let err = ImageUrl::new(Some(raw.to_string())).unwrap_err();
            let vo = err.as_value_object().unwrap();
            assert_eq!(vo.kind(), ValueObjectKind::ImageUrl, "input: {raw}");
            assert_eq!(vo.message(), format!("Invalid image URL: {raw}"));
        }
    }
}
