//! Optional free-text labels: absent is fine, present-but-blank is not.

use catalog_core::{DomainError, DomainResult, ValueObject, ValueObjectKind};

use super::is_blank;

macro_rules! impl_optional_label {
    ($t:ident, $kind:expr, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $t(Option<String>);

        impl $t {
            pub fn new(value: Option<String>) -> DomainResult<Self> {
                match value {
                    Some(v) if is_blank(&v) => Err(DomainError::invalid(
                        $kind,
                        concat!($label, " must not be blank when provided"),
                    )),
                    other => Ok(Self(other)),
                }
            }

            pub fn absent() -> Self {
                Self(None)
            }

            pub fn value(&self) -> Option<&str> {
                self.0.as_deref()
            }

            pub fn is_present(&self) -> bool {
                self.0.is_some()
            }
        }

        impl ValueObject for $t {}
    };
}

impl_optional_label!(Category, ValueObjectKind::Category, "Category");
impl_optional_label!(Brand, ValueObjectKind::Brand, "Brand");
