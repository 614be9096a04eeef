//! Test Helpers

use crate::{
    domain::{
        catalog::{
            CatalogService, CatalogServiceError,
            data::NewProduct,
            models::{Product, ProductUuid},
        },
        orders::models::ShippingAddress,
    },
    test::TestContext,
};

/// A minimal valid product payload. Tests tweak the fields they care about.
pub(crate) fn product_fixture(slug: &str, name: &str, price: &str) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        slug: slug.to_string(),
        name: name.to_string(),
        description: format!("{name} in 18k gold vermeil"),
        price: price.parse().expect("fixture price must be a decimal"),
        compare_at_price: None,
        category_uuid: None,
        images: vec![format!("/images/{slug}.jpg")],
        material: "gold vermeil".to_string(),
        gemstone: None,
        weight_grams: None,
        dimensions: None,
        in_stock: true,
        stock_quantity: 10,
        is_featured: false,
        is_new_arrival: false,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    slug: &str,
    name: &str,
    price: &str,
) -> Result<Product, CatalogServiceError> {
    ctx.catalog
        .create_product(product_fixture(slug, name, price))
        .await
}

/// A well-formed shipping destination for checkout tests.
pub(crate) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Amélie Laurent".to_string(),
        line1: "12 Rue de la Paix".to_string(),
        line2: None,
        city: "Paris".to_string(),
        postal_code: "75002".to_string(),
        country: "FR".to_string(),
        phone: None,
    }
}
