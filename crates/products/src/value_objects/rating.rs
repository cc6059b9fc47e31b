use catalog_core::{DomainError, DomainResult, ValueObject, ValueObjectKind};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Optional customer rating in `[0, 5]`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rating(Option<f64>);

impl Rating {
    pub fn new(value: Option<f64>) -> DomainResult<Self> {
        if let Some(v) = value {
            if !v.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&v) {
                return Err(DomainError::invalid(
                    ValueObjectKind::Rating,
                    format!("Rating must be between {MIN_RATING} and {MAX_RATING}, got {v}"),
                ));
            }
        }
        Ok(Self(value))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl ValueObject for Rating {}
