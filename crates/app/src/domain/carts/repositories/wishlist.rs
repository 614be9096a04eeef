//! Wishlist Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::models::UserUuid,
    domain::{
        carts::models::{WishlistItem, WishlistItemUuid},
        catalog::models::ProductUuid,
    },
};

const GET_WISHLIST_ITEMS_SQL: &str = include_str!("../sql/get_wishlist_items.sql");
const ADD_WISHLIST_ITEM_SQL: &str = include_str!("../sql/add_wishlist_item.sql");
const DELETE_WISHLIST_ITEM_SQL: &str = include_str!("../sql/delete_wishlist_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWishlistRepository;

impl PgWishlistRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_wishlist_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<WishlistItem>, sqlx::Error> {
        query_as::<Postgres, WishlistItem>(GET_WISHLIST_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Add a product to the wishlist. A product already present is left
    /// untouched, so repeated adds are harmless.
    pub(crate) async fn add_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: WishlistItemUuid,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ADD_WISHLIST_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_WISHLIST_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WishlistItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_slug: row.try_get("product_slug")?,
            product_image: row.try_get("product_image")?,
            price: row.try_get("price")?,
            in_stock: row.try_get("in_stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
