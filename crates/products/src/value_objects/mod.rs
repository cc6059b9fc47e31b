//! Self-validating value objects for every product field.
//!
//! Each type keeps its fields private; the validating constructor is the only
//! way in. Lengths are counted in characters, not bytes.

use catalog_core::{DomainError, DomainResult, ValueObjectKind};

mod category;
mod currency;
mod description;
mod id;
mod image_url;
mod name;
mod price;
mod rating;
mod specifications;

pub use category::{Brand, Category};
pub use currency::Currency;
pub use description::Description;
pub use id::ProductId;
pub use image_url::{DEFAULT_IMAGE_URL, ImageUrl};
pub use name::Name;
pub use price::Price;
pub use rating::Rating;
pub use specifications::{
    MAX_SPECIFICATION_KEY_LENGTH, MAX_SPECIFICATION_VALUE_LENGTH, MAX_SPECIFICATIONS,
    Specifications,
};

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Shared check for required free-text fields with a character-length window.
pub(crate) fn check_bounded_text(
    kind: ValueObjectKind,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) -> DomainResult<()> {
    if is_blank(value) {
        return Err(DomainError::invalid(
            kind,
            format!("{label} must not be blank"),
        ));
    }
    let len = char_len(value);
    if len < min || len > max {
        return Err(DomainError::invalid(
            kind,
            format!("{label} must be between {min} and {max} characters"),
        ));
    }
    Ok(())
}
