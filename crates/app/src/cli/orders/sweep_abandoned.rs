use std::sync::Arc;

use clap::Args;
use jiff::SignedDuration;
use vermeil_app::{
    database::{self, Db},
    domain::orders::{OrdersService, PgOrdersService},
    payments::DisabledPaymentGateway,
};

#[derive(Debug, Args)]
pub(crate) struct SweepAbandonedArgs {
    /// Cancel pending orders older than this many hours
    #[arg(long, default_value_t = 24)]
    older_than_hours: i64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SweepAbandonedArgs) -> Result<(), String> {
    if args.older_than_hours < 1 {
        return Err("older-than-hours must be at least 1".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    // The sweep never talks to the payment provider.
    let service = PgOrdersService::new(Db::new(pool), Arc::new(DisabledPaymentGateway));

    let cancelled = service
        .cancel_abandoned(SignedDuration::from_hours(args.older_than_hours))
        .await
        .map_err(|error| format!("failed to sweep abandoned orders: {error}"))?;

    println!("cancelled {cancelled} abandoned orders");

    Ok(())
}
