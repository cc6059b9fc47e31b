//! Infrastructure layer: product persistence (in-memory and PostgreSQL).

pub mod repository;

pub use repository::{
    InMemoryProductRepository, PostgresProductRepository, ProductRepository, ProductSortField,
    RepositoryError,
};
