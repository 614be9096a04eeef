//! Catalog API models.
//!
//! Money leaves the API as decimal strings ("145.00"), never floats.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vermeil_app::domain::catalog::models::{Category, Product, ProductDetails};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            slug: category.slug,
            name: category.name,
            description: category.description,
            image_url: category.image_url,
            created_at: category.created_at.to_string(),
        }
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub category_uuid: Option<Uuid>,
    pub images: Vec<String>,
    pub material: String,
    pub gemstone: Option<String>,
    pub weight_grams: Option<String>,
    pub dimensions: Option<String>,
    pub in_stock: bool,
    pub stock_quantity: u32,
    pub is_featured: bool,
    pub is_new_arrival: bool,
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            slug: product.slug,
            name: product.name,
            description: product.description,
            price: product.price.to_string(),
            compare_at_price: product.compare_at_price.map(|price| price.to_string()),
            category_uuid: product.category_uuid.map(Into::into),
            images: product.images,
            material: product.material,
            gemstone: product.gemstone,
            weight_grams: product.weight_grams.map(|weight| weight.to_string()),
            dimensions: product.dimensions,
            in_stock: product.in_stock,
            stock_quantity: product.stock_quantity,
            is_featured: product.is_featured,
            is_new_arrival: product.is_new_arrival,
            created_at: product.created_at.to_string(),
        }
    }
}

/// Product Details Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsResponse {
    pub product: ProductResponse,
    pub category: Option<CategoryResponse>,
}

impl From<ProductDetails> for ProductDetailsResponse {
    fn from(details: ProductDetails) -> Self {
        Self {
            product: details.product.into(),
            category: details.category.map(Into::into),
        }
    }
}
