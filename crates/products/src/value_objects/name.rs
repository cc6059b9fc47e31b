use catalog_core::{DomainError, DomainResult, ValueObject, ValueObjectKind};

use super::check_bounded_text;

pub const MIN_NAME_LENGTH: usize = 4;
pub const MAX_NAME_LENGTH: usize = 60;

/// Product display name, 4–60 characters, stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        check_bounded_text(
            ValueObjectKind::Name,
            "Name",
            &value,
            MIN_NAME_LENGTH,
            MAX_NAME_LENGTH,
        )?;
        Ok(Self(value))
    }

    pub fn required(value: Option<String>) -> DomainResult<Self> {
        match value {
            Some(v) => Self::new(v),
            None => Err(DomainError::required(ValueObjectKind::Name, "Name is required")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Name {}

impl core::fmt::Display for Name {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
