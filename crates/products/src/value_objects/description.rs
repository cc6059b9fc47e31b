use catalog_core::{DomainError, DomainResult, ValueObject, ValueObjectKind};

use super::check_bounded_text;

pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Free-text product description, 10–500 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        check_bounded_text(
            ValueObjectKind::Description,
            "Description",
            &value,
            MIN_DESCRIPTION_LENGTH,
            MAX_DESCRIPTION_LENGTH,
        )?;
        Ok(Self(value))
    }

    pub fn required(value: Option<String>) -> DomainResult<Self> {
        match value {
            Some(v) => Self::new(v),
            None => Err(DomainError::required(
                ValueObjectKind::Description,
                "Description is required",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Description {}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ViolationReason;

    #[test]
    fn accepts_lengths_within_window() {
        assert!(Description::new("0123456789").is_ok());
        assert!(Description::new("d".repeat(500)).is_ok());
    }

    #[test]
    fn rejects_lengths_outside_window() {
        for raw in ["too short".to_string(), "d".repeat(501)] {
            let err = Description::new(raw).unwrap_err();
            assert_eq!(
                err.as_value_object().unwrap().message(),
                "Description must be between 10 and 500 characters"
            );
        }
    }

    #[test]
    fn rejects_blank() {
        let err = Description::new(" ".repeat(20)).unwrap_err();
        assert_eq!(
            err.as_value_object().unwrap().message(),
            "Description must not be blank"
        );
    }

    #[test]
    fn absent_is_required() {
        let err = Description::required(None).unwrap_err();
        let vo = err.as_value_object().unwrap();
        assert_eq!(vo.kind(), ValueObjectKind::Description);
        assert_eq!(vo.reason(), ViolationReason::Required);
    }
}
