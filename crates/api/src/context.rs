use uuid::Uuid;

/// Per-request context, inserted into request extensions by
/// [`crate::middleware::correlation_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    correlation_id: String,
}

impl RequestContext {
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
        }
    }

    /// Fresh context with a generated correlation id.
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7().to_string())
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }
}
