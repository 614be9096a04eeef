//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json,
};

use crate::{
    auth::models::UserUuid,
    domain::{
        catalog::models::ProductUuid,
        orders::models::{Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid, ShippingAddress},
    },
    uuids::TypedUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const MARK_PAID_SQL: &str = include_str!("sql/mark_paid.sql");
const MARK_FAILED_SQL: &str = include_str!("sql/mark_failed.sql");
const CANCEL_ABANDONED_SQL: &str = include_str!("sql/cancel_abandoned.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        total_amount: Decimal,
        shipping_address: &ShippingAddress,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(total_amount)
            .bind(Json(shipping_address))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
        order: OrderUuid,
        product: ProductUuid,
        quantity: u32,
        price_at_purchase: Decimal,
    ) -> Result<(), sqlx::Error> {
        let quantity = try_quantity_i32(quantity)?;

        query(CREATE_ORDER_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .bind(quantity)
            .bind(price_at_purchase)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<(OrderUuid, OrderItem)>, sqlx::Error> {
        let uuids: Vec<_> = orders.iter().copied().map(TypedUuid::into_uuid).collect();

        let rows = query_as::<Postgres, OrderItemRow>(GET_ORDER_ITEMS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| (row.order_uuid, row.item)).collect())
    }

    pub(crate) async fn mark_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        payment_reference: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = query(MARK_PAID_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(payment_reference)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn mark_failed(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        payment_reference: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = query(MARK_FAILED_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(payment_reference)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn cancel_abandoned(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = query(CANCEL_ABANDONED_SQL)
            .bind(SqlxTimestamp::from(cutoff))
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}

fn try_quantity_i32(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(e),
    })
}

fn try_get_quantity(row: &PgRow) -> sqlx::Result<u32> {
    let quantity: i32 = row.try_get("quantity")?;

    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(e),
    })
}

fn try_get_status(row: &PgRow) -> sqlx::Result<OrderStatus> {
    let status: String = row.try_get("status")?;

    OrderStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: format!("unrecognised order status {status:?}").into(),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(shipping_address) = row.try_get::<Json<ShippingAddress>, _>("shipping_address")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            status: try_get_status(row)?,
            total_amount: row.try_get("total_amount")?,
            shipping_address,
            payment_reference: row.try_get("payment_reference")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Line item row joined back to its parent order for batched fetches.
struct OrderItemRow {
    order_uuid: OrderUuid,
    item: OrderItem,
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            item: OrderItem {
                uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                product_name: row.try_get("product_name")?,
                product_slug: row.try_get("product_slug")?,
                quantity: try_get_quantity(row)?,
                price_at_purchase: row.try_get("price_at_purchase")?,
            },
        })
    }
}
