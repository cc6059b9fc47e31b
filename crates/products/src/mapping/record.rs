use catalog_core::{DomainResult, Entity};

use crate::dto::{ProductRecord, SpecificationRecord};
use crate::product::{Product, ProductParts};
use crate::value_objects::{
    Brand, Category, Currency, Description, ImageUrl, Name, Price, ProductId, Rating,
    Specifications,
};

/// Product → storage record, with specification back-references linked.
pub fn to_record(product: &Product) -> ProductRecord {
    let specifications = product
        .specifications()
        .iter()
        .map(|(k, v)| SpecificationRecord::new(k, v))
        .collect();

    let mut record = ProductRecord {
        id: product.id().as_str().to_string(),
        name: product.name().as_str().to_string(),
        image_url: product.image_url().as_str().to_string(),
        description: product.description().as_str().to_string(),
        price: product.price().value(),
        currency: product.price().currency().code().to_string(),
        rating: product.rating().value(),
        category: product.category().value().map(str::to_string),
        brand: product.brand().value().map(str::to_string),
        specifications: Some(specifications),
        created_at: None,
        updated_at: None,
    };
    after_conversion(&mut record);
    record
}

/// Point every owned specification row back at its product.
pub fn after_conversion(record: &mut ProductRecord) {
    let owner = record.id.clone();
    if let Some(specs) = record.specifications.as_mut() {
        for spec in specs {
            spec.product_id = Some(owner.clone());
        }
    }
}

/// Storage record → product, re-running every value-object check.
///
/// A missing specification list is treated as empty; missing rating, category
/// and brand become absent-valued value objects.
pub fn from_record(record: ProductRecord) -> DomainResult<Product> {
    let currency = Currency::from_code(&record.currency)?;
    let specifications = match record.specifications {
        Some(rows) => Specifications::from_pairs(rows.into_iter().map(|s| (s.key, s.value)))?,
        None => Specifications::empty(),
    };

    Ok(Product::from_parts(ProductParts {
        id: ProductId::new(record.id)?,
        name: Name::new(record.name)?,
        image_url: ImageUrl::new(Some(record.image_url))?,
        description: Description::new(record.description)?,
        price: Price::new(Some(record.price), Some(currency))?,
        rating: Rating::new(record.rating)?,
        category: Category::new(record.category)?,
        brand: Brand::new(record.brand)?,
        specifications,
    }))
}
