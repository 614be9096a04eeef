//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::catalog::{
    data::{NewCategory, NewProduct, Page, ProductFilter, ProductSort},
    models::{Category, CategoryUuid, Product, ProductUuid},
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const GET_CATEGORY_BY_SLUG_SQL: &str = include_str!("sql/get_category_by_slug.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(GET_CATEGORY_SQL)
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_category_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(GET_CATEGORY_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &NewCategory,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(&category.slug)
            .bind(&category.name)
            .bind(&category.description)
            .bind(category.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
        sort: ProductSort,
        page: Page,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let search = filter.search.as_deref().map(escape_like);

        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(filter.category_slug.as_deref())
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.material.as_deref())
            .bind(filter.in_stock)
            .bind(filter.is_featured)
            .bind(filter.is_new_arrival)
            .bind(search)
            .bind(sort.as_str())
            .bind(i64::from(page.limit))
            .bind(i64::from(page.offset))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        let stock_quantity =
            i32::try_from(product.stock_quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "stock_quantity".to_string(),
                source: Box::new(e),
            })?;

        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.slug)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.compare_at_price)
            .bind(product.category_uuid.map(CategoryUuid::into_uuid))
            .bind(&product.images)
            .bind(&product.material)
            .bind(product.gemstone.as_deref())
            .bind(product.weight_grams)
            .bind(product.dimensions.as_deref())
            .bind(product.in_stock)
            .bind(stock_quantity)
            .bind(product.is_featured)
            .bind(product.is_new_arrival)
            .fetch_one(&mut **tx)
            .await
    }
}

/// Escape LIKE wildcards so a search term only ever matches as a literal
/// substring.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    escaped
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let stock_i32: i32 = row.try_get("stock_quantity")?;

        let stock_quantity = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock_quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            compare_at_price: row.try_get("compare_at_price")?,
            category_uuid: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            images: row.try_get("images")?,
            material: row.try_get("material")?,
            gemstone: row.try_get("gemstone")?,
            weight_grams: row.try_get("weight_grams")?,
            dimensions: row.try_get("dimensions")?,
            in_stock: row.try_get("in_stock")?,
            stock_quantity,
            is_featured: row.try_get("is_featured")?,
            is_new_arrival: row.try_get("is_new_arrival")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
