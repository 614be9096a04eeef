//! Orders service.
//!
//! Checkout and payment reconciliation. Postgres is the arbiter of order
//! state: every settling write is a conditional update guarded on
//! `status = 'pending'`, so the duplicate triggers (client confirmation poll
//! and provider webhook) race safely and the loser degrades to an
//! acknowledgement.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::{
    auth::models::UserUuid,
    database::Db,
    domain::{
        carts::repositories::PgCartItemsRepository,
        orders::{
            data::{CheckoutCreated, Reconciliation},
            errors::OrdersServiceError,
            models::{Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid, ShippingAddress},
            repository::PgOrdersRepository,
        },
    },
    payments::{
        CheckoutLineItem, CheckoutSessionRequest, PaymentGateway, PaymentOutcome,
        SessionPaymentStatus,
    },
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    cart_items: PgCartItemsRepository,
    gateway: Arc<dyn PaymentGateway>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            cart_items: PgCartItemsRepository::new(),
            gateway,
        }
    }

    async fn settle_success(
        &self,
        order: OrderUuid,
        user: UserUuid,
        payment_reference: Option<&str>,
    ) -> Result<Reconciliation, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_order(&mut tx, order, user).await?;

        if current.status == OrderStatus::Paid {
            return Ok(Reconciliation::AlreadySettled);
        }

        let rows_affected = self
            .repository
            .mark_paid(&mut tx, order, user, payment_reference)
            .await?;

        if rows_affected == 0 {
            // A concurrent trigger settled the order between our read and
            // write. Re-read to see who won.
            let settled = self.repository.get_order(&mut tx, order, user).await?;

            return match settled.status {
                OrderStatus::Paid => Ok(Reconciliation::AlreadySettled),
                _ => Err(OrdersServiceError::Conflict),
            };
        }

        // The winning transition clears the cart in the same transaction.
        self.cart_items.clear(&mut tx, user).await?;

        tx.commit().await?;

        info!(
            order = %order,
            user = %user,
            amount = %current.total_amount,
            "order paid"
        );

        Ok(Reconciliation::Applied)
    }

    async fn settle_failure(
        &self,
        order: OrderUuid,
        user: UserUuid,
    ) -> Result<Reconciliation, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_order(&mut tx, order, user).await?;

        // A failure signal arriving after settlement is stale; never unwind
        // a paid order.
        if current.status == OrderStatus::Paid {
            return Ok(Reconciliation::AlreadySettled);
        }

        let rows_affected = self.repository.mark_failed(&mut tx, order, user, None).await?;

        if rows_affected == 0 {
            let settled = self.repository.get_order(&mut tx, order, user).await?;

            return match settled.status {
                OrderStatus::Paid | OrderStatus::Failed => Ok(Reconciliation::AlreadySettled),
                _ => Err(OrdersServiceError::Conflict),
            };
        }

        tx.commit().await?;

        info!(order = %order, user = %user, "order payment failed");

        Ok(Reconciliation::Applied)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_checkout(
        &self,
        user: UserUuid,
        shipping_address: ShippingAddress,
    ) -> Result<CheckoutCreated, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart_items = self.cart_items.get_cart_items(&mut tx, user).await?;

        if cart_items.is_empty() {
            return Err(OrdersServiceError::CartEmpty);
        }

        let total_amount: Decimal = cart_items
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum();

        let order = OrderUuid::new();

        self.repository
            .create_order(&mut tx, order, user, total_amount, &shipping_address)
            .await?;

        for item in &cart_items {
            self.repository
                .create_order_item(
                    &mut tx,
                    OrderItemUuid::new(),
                    order,
                    item.product_uuid,
                    item.quantity,
                    item.unit_price,
                )
                .await?;
        }

        // Commit before talking to the provider: if the session call fails,
        // the pending order survives for retry or the abandonment sweeper.
        tx.commit().await?;

        let line_items = cart_items
            .into_iter()
            .map(|item| CheckoutLineItem {
                name: item.product_name,
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect();

        let session = self
            .gateway
            .create_checkout_session(&CheckoutSessionRequest {
                order_uuid: order.into_uuid(),
                user_uuid: user.into_uuid(),
                line_items,
            })
            .await
            .map_err(|error| {
                warn!(order = %order, user = %user, %error, "checkout session creation failed");

                OrdersServiceError::CheckoutFailed(error)
            })?;

        info!(order = %order, user = %user, amount = %total_amount, "checkout started");

        Ok(CheckoutCreated {
            order_uuid: order,
            redirect_url: session.url,
        })
    }

    async fn confirm_checkout(
        &self,
        user: UserUuid,
        session_id: &str,
    ) -> Result<Order, OrdersServiceError> {
        let session = self.gateway.fetch_checkout_session(session_id).await?;

        let Some((order, session_user)) = session.order_metadata() else {
            warn!(session = %session.id, "checkout session carries no order metadata");

            return Err(OrdersServiceError::NotFound);
        };

        if session_user != user.into_uuid() {
            warn!(
                session = %session.id,
                caller = %user,
                "checkout confirmation attempted for another user's order"
            );

            return Err(OrdersServiceError::NotFound);
        }

        let order = OrderUuid::from_uuid(order);

        let outcome = match session.payment_status {
            SessionPaymentStatus::Paid | SessionPaymentStatus::NoPaymentRequired => {
                PaymentOutcome::Succeeded
            }
            SessionPaymentStatus::Unpaid | SessionPaymentStatus::Unknown => {
                return Err(OrdersServiceError::PaymentIncomplete);
            }
        };

        self.reconcile_payment(order, user, outcome, session.payment_intent.as_deref())
            .await?;

        self.get_order(user, order).await
    }

    async fn reconcile_payment<'a>(
        &self,
        order: OrderUuid,
        user: UserUuid,
        outcome: PaymentOutcome,
        payment_reference: Option<&'a str>,
    ) -> Result<Reconciliation, OrdersServiceError> {
        match outcome {
            PaymentOutcome::Succeeded => self.settle_success(order, user, payment_reference).await,
            PaymentOutcome::Failed => self.settle_failure(order, user).await,
        }
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();
        let items = self.repository.get_order_items(&mut tx, &uuids).await?;

        tx.commit().await?;

        let mut by_order: FxHashMap<OrderUuid, Vec<OrderItem>> = FxHashMap::default();

        for (order_uuid, item) in items {
            by_order.entry(order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            if let Some(items) = by_order.remove(&order.uuid) {
                order.items = items;
            }
        }

        Ok(orders)
    }

    async fn get_order(&self, user: UserUuid, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.repository.get_order(&mut tx, order, user).await?;
        let items = self.repository.get_order_items(&mut tx, &[order.uuid]).await?;

        tx.commit().await?;

        order.items = items.into_iter().map(|(_, item)| item).collect();

        Ok(order)
    }

    async fn cancel_abandoned(&self, older_than: SignedDuration) -> Result<u64, OrdersServiceError> {
        let cutoff = Timestamp::now() - older_than;

        let mut tx = self.db.begin().await?;

        let cancelled = self.repository.cancel_abandoned(&mut tx, cutoff).await?;

        tx.commit().await?;

        if cancelled > 0 {
            info!(cancelled, "cancelled abandoned pending orders");
        }

        Ok(cancelled)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Freeze the cart into a pending order and open a provider checkout
    /// session for it. The cart itself is left untouched until payment
    /// succeeds.
    async fn create_checkout(
        &self,
        user: UserUuid,
        shipping_address: ShippingAddress,
    ) -> Result<CheckoutCreated, OrdersServiceError>;

    /// Client-poll confirmation: resolve a provider session, check it belongs
    /// to the caller, and reconcile its payment state.
    async fn confirm_checkout(
        &self,
        user: UserUuid,
        session_id: &str,
    ) -> Result<Order, OrdersServiceError>;

    /// Apply a payment outcome to an order. Shared by the confirmation poll
    /// and the webhook receiver; safe to call any number of times.
    async fn reconcile_payment<'a>(
        &self,
        order: OrderUuid,
        user: UserUuid,
        outcome: PaymentOutcome,
        payment_reference: Option<&'a str>,
    ) -> Result<Reconciliation, OrdersServiceError>;

    /// The user's orders, newest first, with line items.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// A single order, scoped to its owner. Another user's order uuid behaves
    /// as missing.
    async fn get_order(&self, user: UserUuid, order: OrderUuid)
    -> Result<Order, OrdersServiceError>;

    /// Cancel pending orders whose checkout was started before the cutoff and
    /// never settled. Returns how many were cancelled.
    async fn cancel_abandoned(&self, older_than: SignedDuration)
    -> Result<u64, OrdersServiceError>;
}
