//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        orders::{OrdersService, PgOrdersService},
    },
    payments::{
        DisabledPaymentGateway, HttpPaymentGateway, HttpPaymentGatewayConfig, PaymentGateway,
        PaymentGatewayError,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to configure payment gateway")]
    Payments(#[source] PaymentGatewayError),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL and optional payment
    /// provider credentials.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or
    /// constructing the payment gateway fails.
    pub async fn from_database_url(
        url: &str,
        payments: Option<HttpPaymentGatewayConfig>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        // Missing provider credentials disable checkout but leave the rest
        // of the storefront up.
        let gateway: Arc<dyn PaymentGateway> = match payments {
            Some(config) => {
                info!("payment gateway enabled");

                Arc::new(HttpPaymentGateway::new(config).map_err(AppInitError::Payments)?)
            }
            None => {
                warn!("payment gateway not configured; checkout will be unavailable");

                Arc::new(DisabledPaymentGateway)
            }
        };

        let db = Db::new(pool.clone());

        Ok(Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db, gateway)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
