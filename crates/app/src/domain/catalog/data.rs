//! Catalog Data

use rust_decimal::Decimal;

use crate::domain::catalog::models::{CategoryUuid, ProductUuid};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
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
}

/// Product list filters. Absent criteria do not constrain the result;
/// present criteria combine with AND. Price bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category_slug: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub material: Option<String>,
    pub in_stock: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_new_arrival: Option<bool>,
    /// Case-insensitive substring over name, description, material and gemstone.
    pub search: Option<String>,
}

/// Product list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    #[default]
    Newest,
    NameAsc,
}

impl ProductSort {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Newest => "newest",
            Self::NameAsc => "name_asc",
        }
    }
}

/// Pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 24,
            offset: 0,
        }
    }
}
