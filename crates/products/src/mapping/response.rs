use catalog_core::Entity;

use crate::dto::ProductResponse;
use crate::product::Product;

/// Product → response. Total: an absent product yields no content.
pub fn to_response(product: Option<&Product>) -> Option<ProductResponse> {
    product.map(ProductResponse::from)
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id().as_str().to_string(),
            name: p.name().as_str().to_string(),
            image_url: p.image_url().as_str().to_string(),
            description: p.description().as_str().to_string(),
            price: p.price().value(),
            currency: p.price().currency().code().to_string(),
            rating: p.rating().value(),
            category: p.category().value().map(str::to_string),
            brand: p.brand().value().map(str::to_string),
            specifications: p.specifications().as_map().clone(),
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self::from(&p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CreateProductRequest;
    use crate::mapping::from_create_request;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn smartphone() -> Product {
        from_create_request(Some(&CreateProductRequest {
            name: Some("Smartphone Galaxy XZ".to_string()),
            image_url: Some("https://example.com/x.jpg".to_string()),
            description: Some("High-end smartphone with AMOLED display".to_string()),
            price: Some(Decimal::from_str("899.99").unwrap()),
            currency: Some("USD".to_string()),
            rating: Some(4.7),
            category: Some("Electronics".to_string()),
            brand: Some("TechNova".to_string()),
            specifications: Some(BTreeMap::from([(
                "screen".to_string(),
                Some("6.5in".to_string()),
            )])),
        }))
        .unwrap()
    }

    #[test]
    fn absent_product_has_no_response() {
        assert_eq!(to_response(None), None);
    }

    #[test]
    fn response_reproduces_request_fields_and_id() {
        let product = smartphone();
        let resp = to_response(Some(&product)).unwrap();

        assert_eq!(resp.id, product.id().as_str());
        assert_eq!(resp.name, "Smartphone Galaxy XZ");
        assert_eq!(resp.image_url, "https://example.com/x.jpg");
        assert_eq!(resp.description, "High-end smartphone with AMOLED display");
        assert_eq!(resp.price, Decimal::from_str("899.99").unwrap());
        assert_eq!(resp.currency, "USD");
        assert_eq!(resp.rating, Some(4.7));
        assert_eq!(resp.category.as_deref(), Some("Electronics"));
        assert_eq!(resp.brand.as_deref(), Some("TechNova"));
        assert_eq!(
            resp.specifications,
            BTreeMap::from([("screen".to_string(), "6.5in".to_string())])
        );
    }

    #[test]
    fn response_is_idempotent() {
        let product = smartphone();
        assert_eq!(to_response(Some(&product)), to_response(Some(&product)));
    }
}
