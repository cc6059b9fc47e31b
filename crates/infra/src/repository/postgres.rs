//! Postgres-backed product repository.
//!
//! Products live in `products`; their specifications in
//! `product_specifications`, one row per entry, owned through `product_id`
//! with `ON DELETE CASCADE`. Every write runs in a single transaction.
//!
//! ## Error Mapping
//!
//! | Situation | RepositoryError |
//! |-----------|-----------------|
//! | Name already used by another product | `Domain(AlreadyExists)` |
//! | Unknown id on update / delete | `Domain(NotFound)` |
//! | Primary-key collision on insert (`23505`) | `Domain(Invalid)` |
//! | Stored row fails value-object validation | `Domain(ValueObject)` |
//! | Anything else from sqlx | `Storage` |

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::{Span, instrument};

use catalog_core::{DomainError, Entity, Page, PageRequest, SortDirection};
use catalog_products::mapping::to_record;
use catalog_products::{Product, ProductId, ProductRecord, SpecificationRecord};

use super::{ProductRepository, RepositoryError, load_record, resolve_sort};

const SCHEMA: &str = include_str!("../../migrations/0001_create_products.sql");

#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: Arc<PgPool>,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the catalog tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Attach specification rows to already-loaded product rows, in insertion
    /// order.
    async fn load_specifications(
        &self,
        records: &mut [ProductRecord],
    ) -> Result<(), RepositoryError> {
        if records.is_empty() {
            return Ok(());
        }
        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, product_id, spec_key, spec_value
            FROM product_specifications
            WHERE product_id = ANY($1)
            ORDER BY product_id, position
            "#,
        )
        .bind(&ids)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("load_specifications", e))?;

        let mut by_product: HashMap<String, Vec<SpecificationRecord>> = HashMap::new();
        for row in rows {
            let spec = row_to_specification(&row)?;
            let owner = spec.product_id.clone().unwrap_or_default();
            by_product.entry(owner).or_default().push(spec);
        }
        for record in records.iter_mut() {
            record.specifications = Some(by_product.remove(&record.id).unwrap_or_default());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, image_url, description, price, currency, rating,
                   category, brand, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut records = vec![row_to_record(&row)?];
        self.load_specifications(&mut records).await?;

        let record = records.pop().ok_or_else(|| {
            RepositoryError::Storage("product row vanished while loading".to_string())
        })?;
        Ok(Some(load_record(record)?))
    }

    #[instrument(
        skip(self, page),
        fields(page = page.page, size = page.size, returned = tracing::field::Empty),
        err
    )]
    async fn find_all(&self, page: &PageRequest) -> Result<Page<Product>, RepositoryError> {
        let order_by = resolve_sort(page)?
            .into_iter()
            .map(|(field, direction)| {
                let dir = match direction {
                    SortDirection::Asc => "ASC",
                    SortDirection::Desc => "DESC",
                };
                format!("{} {dir}", field.column())
            })
            .chain(std::iter::once("id ASC".to_string()))
            .collect::<Vec<_>>()
            .join(", ");

        // Column names come from ProductSortField, never from the caller.
        let sql = format!(
            r#"
            SELECT id, name, image_url, description, price, currency, rating,
                   category, brand, created_at, updated_at
            FROM products
            ORDER BY {order_by}
            LIMIT $1 OFFSET $2
            "#
        );

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_products", e))?;

        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows = sqlx::query(&sql)
            .bind(i64::from(page.size))
            .bind(offset)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_all", e))?;

        let mut records = rows
            .iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>, _>>()?;
        self.load_specifications(&mut records).await?;

        Span::current().record("returned", records.len());
        let content = records
            .into_iter()
            .map(load_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(content, page, u64::try_from(total).unwrap_or(0)))
    }

    #[instrument(skip(self, product), fields(product_id = %product.id()), err)]
    async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
        let record = to_record(&product);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        if name_taken(&mut tx, &record.name, None).await? {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(DomainError::already_exists(&record.name).into());
        }

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, image_url, description, price, currency, rating, category, brand
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.image_url)
        .bind(&record.description)
        .bind(record.price)
        .bind(&record.currency)
        .bind(record.rating)
        .bind(&record.category)
        .bind(&record.brand)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::from(DomainError::invalid_entity(format!(
                    "product id already in use: {}",
                    record.id
                )))
            } else {
                map_sqlx_error("insert_product", e)
            }
        })?;

        insert_specifications(&mut tx, &record).await?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;
        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id()), err)]
    async fn update(&self, product: Product) -> Result<Product, RepositoryError> {
        let record = to_record(&product);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let exists = sqlx::query("SELECT id FROM products WHERE id = $1 FOR UPDATE")
            .bind(&record.id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("lock_product", e))?
            .is_some();
        if !exists {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(DomainError::not_found(&record.id).into());
        }

        if name_taken(&mut tx, &record.name, Some(&record.id)).await? {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(DomainError::already_exists(&record.name).into());
        }

        sqlx::query(
            r#"
            UPDATE products
            SET name = $2,
                image_url = $3,
                description = $4,
                price = $5,
                currency = $6,
                rating = $7,
                category = $8,
                brand = $9,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.image_url)
        .bind(&record.description)
        .bind(record.price)
        .bind(&record.currency)
        .bind(record.rating)
        .bind(&record.category)
        .bind(&record.brand)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?;

        sqlx::query("DELETE FROM product_specifications WHERE product_id = $1")
            .bind(&record.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("clear_specifications", e))?;
        insert_specifications(&mut tx, &record).await?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;
        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(id.as_str()).into());
        }
        Ok(())
    }
}

async fn name_taken(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    except_id: Option<&str>,
) -> Result<bool, RepositoryError> {
    let row = sqlx::query(
        r#"
        SELECT id FROM products
        WHERE name = $1 AND ($2::TEXT IS NULL OR id <> $2)
        LIMIT 1
        "#,
    )
    .bind(name)
    .bind(except_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| map_sqlx_error("check_name", e))?;
    Ok(row.is_some())
}

async fn insert_specifications(
    tx: &mut Transaction<'_, Postgres>,
    record: &ProductRecord,
) -> Result<(), RepositoryError> {
    let Some(specs) = record.specifications.as_ref() else {
        return Ok(());
    };
    for (position, spec) in specs.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO product_specifications (product_id, position, spec_key, spec_value)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(spec.product_id.as_deref().unwrap_or(&record.id))
        .bind(position as i32)
        .bind(&spec.key)
        .bind(&spec.value)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("insert_specification", e))?;
    }
    Ok(())
}

fn row_to_record(row: &PgRow) -> Result<ProductRecord, RepositoryError> {
    let get_err = |e: sqlx::Error| RepositoryError::Storage(format!("failed to decode product row: {e}"));
    let currency: String = row.try_get("currency").map_err(get_err)?;
    Ok(ProductRecord {
        id: row.try_get("id").map_err(get_err)?,
        name: row.try_get("name").map_err(get_err)?,
        image_url: row.try_get("image_url").map_err(get_err)?,
        description: row.try_get("description").map_err(get_err)?,
        price: row.try_get("price").map_err(get_err)?,
        // CHAR(3) comes back space-padded if a shorter code was ever stored.
        currency: currency.trim_end().to_string(),
        rating: row.try_get("rating").map_err(get_err)?,
        category: row.try_get("category").map_err(get_err)?,
        brand: row.try_get("brand").map_err(get_err)?,
        specifications: None,
        created_at: row.try_get("created_at").map_err(get_err)?,
        updated_at: row.try_get("updated_at").map_err(get_err)?,
    })
}

fn row_to_specification(row: &PgRow) -> Result<SpecificationRecord, RepositoryError> {
    let get_err =
        |e: sqlx::Error| RepositoryError::Storage(format!("failed to decode specification row: {e}"));
    Ok(SpecificationRecord {
        id: row.try_get("id").map_err(get_err)?,
        product_id: row.try_get("product_id").map_err(get_err)?,
        key: row.try_get("spec_key").map_err(get_err)?,
        value: row.try_get("spec_value").map_err(get_err)?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => RepositoryError::Storage(format!(
            "database error in {operation}: {}",
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            RepositoryError::Storage(format!("connection pool closed in {operation}"))
        }
        _ => RepositoryError::Storage(format!("sqlx error in {operation}: {err}")),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
