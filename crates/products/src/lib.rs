//! Products domain module.
//!
//! This crate contains the catalog's business rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage): self-validating
//! value objects, the immutable `Product` aggregate, the boundary DTO shapes,
//! and the mapping pipeline between them.

pub mod dto;
pub mod mapping;
pub mod product;
pub mod value_objects;

pub use dto::{
    CreateProductRequest, ProductRecord, ProductResponse, SpecificationRecord,
    UpdateProductRequest,
};
pub use product::{Product, ProductParts};
pub use value_objects::{
    Brand, Category, Currency, DEFAULT_IMAGE_URL, Description, ImageUrl, Name, Price, ProductId,
    Rating, Specifications,
};
