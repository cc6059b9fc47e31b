//! Product repository: the persistence contract and its implementations.
//!
//! Name uniqueness is enforced query-then-write. Without a database constraint
//! this is race-prone; two concurrent writers can both pass the check.

use thiserror::Error;

use catalog_core::{DomainError, Page, PageRequest, SortDirection, SortOrder};
use catalog_products::mapping::from_record;
use catalog_products::{Product, ProductId, ProductRecord};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity-level failures (`NotFound`, `AlreadyExists`).
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("unsupported sort property: {0}")]
    InvalidSort(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            RepositoryError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Rebuild a product from its stored record.
///
/// A stored row that no longer passes validation is reported as `Storage`.
pub(crate) fn load_record(record: ProductRecord) -> Result<Product, RepositoryError> {
    let id = record.id.clone();
    from_record(record)
        .map_err(|e| RepositoryError::Storage(format!("stored product {id:?} is invalid: {e}")))
}

/// Persistence contract for products.
#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// One page of products, ordered by `page.sort` (default: name ascending),
    /// ties broken by id.
    async fn find_all(&self, page: &PageRequest) -> Result<Page<Product>, RepositoryError>;

    /// Insert a new product. Fails `AlreadyExists` if the name is taken.
    async fn save(&self, product: Product) -> Result<Product, RepositoryError>;

    /// Replace an existing product wholesale. Fails `NotFound` for an unknown
    /// id and `AlreadyExists` if the new name belongs to a different product.
    async fn update(&self, product: Product) -> Result<Product, RepositoryError>;

    /// Fails `NotFound` for an unknown id.
    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError>;
}

/// Properties products can be sorted by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProductSortField {
    Id,
    Name,
    Price,
    Rating,
    Category,
    Brand,
    CreatedAt,
}

impl ProductSortField {
    pub const ALL: [ProductSortField; 7] = [
        ProductSortField::Id,
        ProductSortField::Name,
        ProductSortField::Price,
        ProductSortField::Rating,
        ProductSortField::Category,
        ProductSortField::Brand,
        ProductSortField::CreatedAt,
    ];

    pub fn parse(property: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.property() == property)
    }

    /// Name used in sort query parameters.
    pub fn property(self) -> &'static str {
        match self {
            ProductSortField::Id => "id",
            ProductSortField::Name => "name",
            ProductSortField::Price => "price",
            ProductSortField::Rating => "rating",
            ProductSortField::Category => "category",
            ProductSortField::Brand => "brand",
            ProductSortField::CreatedAt => "createdAt",
        }
    }

    pub(crate) fn column(self) -> &'static str {
        match self {
            ProductSortField::Id => "id",
            ProductSortField::Name => "name",
            ProductSortField::Price => "price",
            ProductSortField::Rating => "rating",
            ProductSortField::Category => "category",
            ProductSortField::Brand => "brand",
            ProductSortField::CreatedAt => "created_at",
        }
    }
}

/// Resolve the sort terms of a page request, defaulting to `name asc`.
pub(crate) fn resolve_sort(
    page: &PageRequest,
) -> Result<Vec<(ProductSortField, SortDirection)>, RepositoryError> {
    if page.sort.is_empty() {
        return Ok(vec![(ProductSortField::Name, SortDirection::Asc)]);
    }
    page.sort
        .iter()
        .map(|SortOrder { property, direction }| {
            ProductSortField::parse(property)
                .map(|f| (f, *direction))
                .ok_or_else(|| RepositoryError::InvalidSort(property.clone()))
        })
        .collect()
}
