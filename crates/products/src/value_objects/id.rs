use core::str::FromStr;

use uuid::Uuid;

use catalog_core::{DomainError, DomainResult, ValueObject, ValueObjectKind};

use super::is_blank;

/// Product identifier: non-blank, `[A-Za-z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if is_blank(&value) {
            return Err(DomainError::invalid(
                ValueObjectKind::Id,
                "Product id must not be blank",
            ));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::invalid(
                ValueObjectKind::Id,
                format!("Invalid product id format: {value}"),
            ));
        }
        Ok(Self(value))
    }

    /// Like [`ProductId::new`], failing with `Required` when absent.
    pub fn required(value: Option<String>) -> DomainResult<Self> {
        match value {
            Some(v) => Self::new(v),
            None => Err(DomainError::required(
                ValueObjectKind::Id,
                "Product id is required",
            )),
        }
    }

    /// Fresh random identifier.
    ///
    /// Uses UUIDv7 (time-ordered); the hyphenated form satisfies the id format.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl ValueObject for ProductId {}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
