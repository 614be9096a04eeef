use clap::Args;
use vermeil_app::{
    auth::{AuthService, PgAuthService},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct SweepArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SweepArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool);

    let removed = service
        .sweep_expired_sessions()
        .await
        .map_err(|error| format!("failed to sweep sessions: {error}"))?;

    println!("removed {removed} expired sessions");

    Ok(())
}
