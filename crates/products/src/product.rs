//! Product aggregate: an immutable composition of validated value objects.

use catalog_core::Entity;

use crate::value_objects::{
    Brand, Category, Description, ImageUrl, Name, Price, ProductId, Rating, Specifications,
};

/// Validated parts of a [`Product`].
///
/// Every field is already a value object, so assembling a product cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductParts {
    pub id: ProductId,
    pub name: Name,
    pub image_url: ImageUrl,
    pub description: Description,
    pub price: Price,
    pub rating: Rating,
    pub category: Category,
    pub brand: Brand,
    pub specifications: Specifications,
}

/// Aggregate root: Product.
///
/// Never mutated after construction; an update produces a whole new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: Name,
    image_url: ImageUrl,
    description: Description,
    price: Price,
    rating: Rating,
    category: Category,
    brand: Brand,
    specifications: Specifications,
}

impl Product {
    pub fn from_parts(parts: ProductParts) -> Self {
        let ProductParts {
            id,
            name,
            image_url,
            description,
            price,
            rating,
            category,
            brand,
            specifications,
        } = parts;
        Self {
            id,
            name,
            image_url,
            description,
            price,
            rating,
            category,
            brand,
            specifications,
        }
    }

    pub fn into_parts(self) -> ProductParts {
        ProductParts {
            id: self.id,
            name: self.name,
            image_url: self.image_url,
            description: self.description,
            price: self.price,
            rating: self.rating,
            category: self.category,
            brand: self.brand,
            specifications: self.specifications,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn image_url(&self) -> &ImageUrl {
        &self.image_url
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn rating(&self) -> &Rating {
        &self.rating
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    pub fn specifications(&self) -> &Specifications {
        &self.specifications
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
