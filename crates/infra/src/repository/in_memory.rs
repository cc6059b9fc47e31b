use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use chrono::Utc;

use catalog_core::{DomainError, Entity, Page, PageRequest, SortDirection};
use catalog_products::mapping::to_record;
use catalog_products::{Product, ProductId, ProductRecord};

use super::{ProductRepository, ProductSortField, RepositoryError, load_record, resolve_sort};

/// In-memory product repository for tests/dev.
///
/// Stores storage records rather than products, so every write and read goes
/// through the same storage mapping the database-backed repository uses.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    inner: RwLock<HashMap<String, ProductRecord>>,
    next_spec_id: AtomicI64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            next_spec_id: AtomicI64::new(1),
        }
    }

    fn assign_spec_ids(&self, record: &mut ProductRecord) {
        if let Some(specs) = record.specifications.as_mut() {
            for spec in specs {
                spec.id = Some(self.next_spec_id.fetch_add(1, AtomicOrdering::Relaxed));
            }
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("in-memory product store lock poisoned".to_string())
}

/// `None` sorts after every value, matching Postgres' default `NULLS LAST`
/// for ascending order.
fn cmp_nulls_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_by(field: ProductSortField, a: &ProductRecord, b: &ProductRecord) -> Ordering {
    match field {
        ProductSortField::Id => a.id.cmp(&b.id),
        ProductSortField::Name => a.name.cmp(&b.name),
        ProductSortField::Price => a.price.cmp(&b.price),
        ProductSortField::Rating => cmp_nulls_last(a.rating, b.rating),
        ProductSortField::Category => cmp_nulls_last(a.category.as_ref(), b.category.as_ref()),
        ProductSortField::Brand => cmp_nulls_last(a.brand.as_ref(), b.brand.as_ref()),
        ProductSortField::CreatedAt => cmp_nulls_last(a.created_at, b.created_at),
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let record = {
            let map = self.inner.read().map_err(|_| poisoned())?;
            map.get(id.as_str()).cloned()
        };
        record.map(load_record).transpose()
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<Product>, RepositoryError> {
        let sort = resolve_sort(page)?;
        let mut records: Vec<ProductRecord> = {
            let map = self.inner.read().map_err(|_| poisoned())?;
            map.values().cloned().collect()
        };

        records.sort_by(|a, b| {
            sort.iter()
                .map(|(field, direction)| match direction {
                    SortDirection::Asc => cmp_by(*field, a, b),
                    SortDirection::Desc => cmp_by(*field, a, b).reverse(),
                })
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.id.cmp(&b.id))
        });

        let total = records.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let content = records
            .into_iter()
            .skip(offset)
            .take(page.size as usize)
            .map(load_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, page, total))
    }

    async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;

        let name = product.name().as_str();
        if map.values().any(|r| r.name == name) {
            return Err(DomainError::already_exists(name).into());
        }
        let id = product.id().as_str();
        if map.contains_key(id) {
            return Err(DomainError::invalid_entity(format!("product id already in use: {id}")).into());
        }

        let mut record = to_record(&product);
        let now = Utc::now();
        record.created_at = Some(now);
        record.updated_at = Some(now);
        self.assign_spec_ids(&mut record);
        map.insert(record.id.clone(), record);

        Ok(product)
    }

    async fn update(&self, product: Product) -> Result<Product, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;

        let id = product.id().as_str();
        let created_at = match map.get(id) {
            Some(existing) => existing.created_at,
            None => return Err(DomainError::not_found(id).into()),
        };
        let name = product.name().as_str();
        if map.values().any(|r| r.name == name && r.id != id) {
            return Err(DomainError::already_exists(name).into());
        }

        let mut record = to_record(&product);
        record.created_at = created_at;
        record.updated_at = Some(Utc::now());
        self.assign_spec_ids(&mut record);
        map.insert(record.id.clone(), record);

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        match map.remove(id.as_str()) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(id.as_str()).into()),
        }
    }
}
