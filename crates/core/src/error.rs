//! Domain error model.
//!
//! The taxonomy is closed: value-object validation failures, entity-level
//! failures, and mapping failures (plus the precondition failure raised by the
//! request mappers when the currency code is missing).

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Which value object rejected its input.
///
/// Callers derive stable machine-readable codes from the kind via
/// [`ValueObjectKind::code`] instead of matching on messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueObjectKind {
    Id,
    Name,
    Description,
    ImageUrl,
    Price,
    Rating,
    Category,
    Brand,
    Specifications,
}

impl ValueObjectKind {
    /// Stable error code for this kind (used verbatim in API error bodies).
    pub fn code(self) -> &'static str {
        match self {
            ValueObjectKind::Id => "product_id_invalid",
            ValueObjectKind::Name => "product_name_invalid",
            ValueObjectKind::Description => "product_description_invalid",
            ValueObjectKind::ImageUrl => "product_image_url_invalid",
            ValueObjectKind::Price => "product_price_invalid",
            ValueObjectKind::Rating => "product_rating_invalid",
            ValueObjectKind::Category => "product_category_invalid",
            ValueObjectKind::Brand => "product_brand_invalid",
            ValueObjectKind::Specifications => "product_specifications_invalid",
        }
    }

    /// Field name as it appears in the external representation.
    pub fn field(self) -> &'static str {
        match self {
            ValueObjectKind::Id => "id",
            ValueObjectKind::Name => "name",
            ValueObjectKind::Description => "description",
            ValueObjectKind::ImageUrl => "imageUrl",
            ValueObjectKind::Price => "price",
            ValueObjectKind::Rating => "rating",
            ValueObjectKind::Category => "category",
            ValueObjectKind::Brand => "brand",
            ValueObjectKind::Specifications => "specifications",
        }
    }
}

impl core::fmt::Display for ValueObjectKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.field())
    }
}

/// Why a value object rejected its input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ViolationReason {
    /// The value was absent.
    Required,
    /// The value was present but broke an invariant.
    Invalid,
}

/// A value object could not be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ValueObjectError {
    kind: ValueObjectKind,
    reason: ViolationReason,
    message: String,
}

impl ValueObjectError {
    pub fn required(kind: ValueObjectKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            reason: ViolationReason::Required,
            message: msg.into(),
        }
    }

    pub fn invalid(kind: ValueObjectKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            reason: ViolationReason::Invalid,
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ValueObjectKind {
        self.kind
    }

    pub fn reason(&self) -> ViolationReason {
        self.reason
    }

    /// Human-readable message (not meant for programmatic matching).
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Entity-level failures (raised by persistence collaborators).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityError {
    #[error("product not found: {id}")]
    NotFound { id: String },

    #[error("product already exists with name: {name}")]
    AlreadyExists { name: String },

    #[error("invalid product: {reason}")]
    Invalid { reason: String },
}

/// The object handed to a mapper was itself absent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("mapping failed: {message}")]
pub struct MappingError {
    message: String,
}

impl MappingError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Infrastructure
/// concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    ValueObject(#[from] ValueObjectError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A required input was missing before any value object could be built.
    ///
    /// Deliberately outside the value-object taxonomy.
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl DomainError {
    pub fn required(kind: ValueObjectKind, msg: impl Into<String>) -> Self {
        Self::ValueObject(ValueObjectError::required(kind, msg))
    }

    pub fn invalid(kind: ValueObjectKind, msg: impl Into<String>) -> Self {
        Self::ValueObject(ValueObjectError::invalid(kind, msg))
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::Entity(EntityError::NotFound { id: id.into() })
    }

    pub fn already_exists(name: impl Into<String>) -> Self {
        Self::Entity(EntityError::AlreadyExists { name: name.into() })
    }

    pub fn invalid_entity(reason: impl Into<String>) -> Self {
        Self::Entity(EntityError::Invalid {
            reason: reason.into(),
        })
    }

    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::Mapping(MappingError::new(msg))
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// The value-object error, if this is one.
    pub fn as_value_object(&self) -> Option<&ValueObjectError> {
        match self {
            DomainError::ValueObject(e) => Some(e),
            _ => None,
        }
    }
}
