//! Plain data shapes at the boundaries of the domain.
//!
//! - Request DTOs: inbound JSON; every field optional at the serde level so the
//!   value objects decide what is missing.
//! - Response DTO: outbound flat JSON.
//! - Records: the relational storage shape.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub rating: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub specifications: Option<BTreeMap<String, Option<String>>>,
}

/// Same shape as [`CreateProductRequest`]; `id`, if sent, is ignored in favour
/// of the id in the request path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub rating: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub specifications: Option<BTreeMap<String, Option<String>>>,
}

// -------------------------
// Response DTO
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

// -------------------------
// Storage records
// -------------------------

/// Row shape of the `products` table plus its owned specification rows.
///
/// Timestamps belong to the storage layer; the mapping pipeline leaves them
/// unset.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub price: Decimal,
    pub currency: String,
    pub rating: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub specifications: Option<Vec<SpecificationRecord>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row shape of `product_specifications`. `product_id` is the back-reference
/// to the owning product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationRecord {
    pub id: Option<i64>,
    pub product_id: Option<String>,
    pub key: String,
    pub value: String,
}

impl SpecificationRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            product_id: None,
            key: key.into(),
            value: value.into(),
        }
    }
}
