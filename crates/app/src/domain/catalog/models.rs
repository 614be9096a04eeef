//! Catalog Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

/// Category Model
#[derive(Debug, Clone)]
pub struct Category {
    pub uuid: CategoryUuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub category_uuid: Option<CategoryUuid>,
    pub images: Vec<String>,
    pub material: String,
    pub gemstone: Option<String>,
    pub weight_grams: Option<Decimal>,
    pub dimensions: Option<String>,
    pub in_stock: bool,
    pub stock_quantity: u32,
    pub is_featured: bool,
    pub is_new_arrival: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product joined with its category, as served on detail pages.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub product: Product,
    pub category: Option<Category>,
}
