use std::collections::BTreeMap;

use rust_decimal::Decimal;

use catalog_core::{DomainError, DomainResult};

use crate::dto::{CreateProductRequest, UpdateProductRequest};
use crate::product::{Product, ProductParts};
use crate::value_objects::{
    Brand, Category, Currency, Description, ImageUrl, Name, Price, ProductId, Rating,
    Specifications,
};

/// Borrowed view over the fields create and update requests share.
struct RequestFields<'a> {
    name: &'a Option<String>,
    image_url: &'a Option<String>,
    description: &'a Option<String>,
    price: Option<Decimal>,
    currency: Option<&'a str>,
    rating: Option<f64>,
    category: &'a Option<String>,
    brand: &'a Option<String>,
    specifications: &'a Option<BTreeMap<String, Option<String>>>,
}

impl<'a> From<&'a CreateProductRequest> for RequestFields<'a> {
    fn from(r: &'a CreateProductRequest) -> Self {
        Self {
            name: &r.name,
            image_url: &r.image_url,
            description: &r.description,
            price: r.price,
            currency: r.currency.as_deref(),
            rating: r.rating,
            category: &r.category,
            brand: &r.brand,
            specifications: &r.specifications,
        }
    }
}

impl<'a> From<&'a UpdateProductRequest> for RequestFields<'a> {
    fn from(r: &'a UpdateProductRequest) -> Self {
        Self {
            name: &r.name,
            image_url: &r.image_url,
            description: &r.description,
            price: r.price,
            currency: r.currency.as_deref(),
            rating: r.rating,
            category: &r.category,
            brand: &r.brand,
            specifications: &r.specifications,
        }
    }
}

/// Create request → new product with a freshly generated id.
pub fn from_create_request(request: Option<&CreateProductRequest>) -> DomainResult<Product> {
    let request =
        request.ok_or_else(|| DomainError::mapping("create product request is absent"))?;
    let fields = RequestFields::from(request);
    let currency_code = require_currency(&fields)?;
    assemble(ProductId::generate(), currency_code, fields)
}

/// Update request → replacement product carrying the caller-supplied id.
///
/// The body's own `id` field is ignored.
pub fn from_update_request(
    id: ProductId,
    request: Option<&UpdateProductRequest>,
) -> DomainResult<Product> {
    let request =
        request.ok_or_else(|| DomainError::mapping("update product request is absent"))?;
    let fields = RequestFields::from(request);
    let currency_code = require_currency(&fields)?;
    assemble(id, currency_code, fields)
}

// Checked before any value object is built so the failure stays distinct from
// value-object validation.
fn require_currency<'a>(fields: &RequestFields<'a>) -> DomainResult<&'a str> {
    fields
        .currency
        .ok_or_else(|| DomainError::precondition("currency is required"))
}

fn assemble(id: ProductId, currency_code: &str, fields: RequestFields<'_>) -> DomainResult<Product> {
    let currency = Currency::from_code(currency_code)?;
    Ok(Product::from_parts(ProductParts {
        id,
        name: Name::required(fields.name.clone())?,
        image_url: ImageUrl::new(fields.image_url.clone())?,
        description: Description::required(fields.description.clone())?,
        price: Price::new(fields.price, Some(currency))?,
        rating: Rating::new(fields.rating)?,
        category: Category::new(fields.category.clone())?,
        brand: Brand::new(fields.brand.clone())?,
        specifications: Specifications::new(fields.specifications.clone())?,
    }))
}
