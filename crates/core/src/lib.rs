//! `catalog-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error taxonomy, value object / entity traits, and pagination types shared
//! by the persistence and HTTP layers.

pub mod entity;
pub mod error;
pub mod page;
pub mod value_object;

pub use entity::Entity;
pub use error::{
    DomainError, DomainResult, EntityError, MappingError, ValueObjectError, ValueObjectKind,
    ViolationReason,
};
pub use page::{Page, PageRequest, SortDirection, SortOrder};
pub use value_object::ValueObject;
