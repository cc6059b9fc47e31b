//! Application service: request mapping, repository calls, logging.

use std::sync::Arc;

use thiserror::Error;

use catalog_core::{DomainError, Page, PageRequest};
use catalog_infra::{
    InMemoryProductRepository, PostgresProductRepository, ProductRepository, RepositoryError,
};
use catalog_products::mapping::{from_create_request, from_update_request};
use catalog_products::{CreateProductRequest, ProductId, ProductResponse, UpdateProductRequest};

use crate::config::{AppConfig, StoreConfig};
use crate::context::RequestContext;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("unsupported sort property: {0}")]
    InvalidSort(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Domain(e) => ServiceError::Domain(e),
            RepositoryError::InvalidSort(p) => ServiceError::InvalidSort(p),
            RepositoryError::Storage(msg) => ServiceError::Storage(msg),
        }
    }
}

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductRepository::new()))
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: Option<&CreateProductRequest>,
    ) -> Result<ProductResponse, ServiceError> {
        let result = self.try_create(request).await;

        match &result {
            Ok(p) => tracing::info!(correlation_id = %ctx.correlation_id(), product_id = %p.id, "product created"),
            Err(e) => log_failure(ctx, "create", e),
        }
        result
    }

    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: &ProductId,
    ) -> Result<ProductResponse, ServiceError> {
        tracing::debug!(correlation_id = %ctx.correlation_id(), product_id = %id, "loading product");
        let result = self.try_get(id).await;

        if let Err(e) = &result {
            log_failure(ctx, "get", e);
        }
        result
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<Page<ProductResponse>, ServiceError> {
        tracing::debug!(
            correlation_id = %ctx.correlation_id(),
            page = page.page,
            size = page.size,
            "listing products"
        );
        let result = self
            .repo
            .find_all(page)
            .await
            .map(|p| p.map(ProductResponse::from))
            .map_err(ServiceError::from);

        if let Err(e) = &result {
            log_failure(ctx, "list", e);
        }
        result
    }

    /// Replace the product at `id` wholesale. The id in the path wins over any
    /// id in the body.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        request: Option<&UpdateProductRequest>,
    ) -> Result<ProductResponse, ServiceError> {
        let result = self.try_update(id, request).await;

        match &result {
            Ok(p) => tracing::info!(correlation_id = %ctx.correlation_id(), product_id = %p.id, "product updated"),
            Err(e) => log_failure(ctx, "update", e),
        }
        result
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &ProductId) -> Result<(), ServiceError> {
        let result = self.repo.delete(id).await.map_err(ServiceError::from);

        match &result {
            Ok(()) => tracing::info!(correlation_id = %ctx.correlation_id(), product_id = %id, "product deleted"),
            Err(e) => log_failure(ctx, "delete", e),
        }
        result
    }

    async fn try_create(
        &self,
        request: Option<&CreateProductRequest>,
    ) -> Result<ProductResponse, ServiceError> {
        let product = from_create_request(request)?;
        let saved = self.repo.save(product).await?;
        Ok(ProductResponse::from(saved))
    }

    async fn try_get(&self, id: &ProductId) -> Result<ProductResponse, ServiceError> {
        match self.repo.find_by_id(id).await? {
            Some(product) => Ok(ProductResponse::from(product)),
            None => Err(DomainError::not_found(id.as_str()).into()),
        }
    }

    async fn try_update(
        &self,
        id: ProductId,
        request: Option<&UpdateProductRequest>,
    ) -> Result<ProductResponse, ServiceError> {
        let product = from_update_request(id, request)?;
        let saved = self.repo.update(product).await?;
        Ok(ProductResponse::from(saved))
    }
}

fn log_failure(ctx: &RequestContext, operation: &'static str, err: &ServiceError) {
    match err {
        ServiceError::Storage(msg) => tracing::error!(
            correlation_id = %ctx.correlation_id(),
            operation,
            error = %msg,
            "product storage failure"
        ),
        other => tracing::warn!(
            correlation_id = %ctx.correlation_id(),
            operation,
            error = %other,
            "product request rejected"
        ),
    }
}

/// Wire the product service to the store named in `config`.
pub async fn build_services(config: &AppConfig) -> Result<ProductService, RepositoryError> {
    match &config.store {
        StoreConfig::InMemory => {
            tracing::info!("using in-memory product store");
            Ok(ProductService::in_memory())
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
            run_migrations,
        } => {
            let repo = PostgresProductRepository::connect(database_url, *max_connections).await?;
            if *run_migrations {
                repo.migrate().await?;
                tracing::info!("product schema migrated");
            }
            tracing::info!(max_connections, "using postgres product store");
            Ok(ProductService::new(Arc::new(repo)))
        }
    }
}
