use clap::Args;
use vermeil_app::{
    auth::{AuthService, PgAuthService},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Account email address
    #[arg(long)]
    email: String,

    /// Account display name
    #[arg(long)]
    name: String,

    /// Account password
    #[arg(long, env = "VERMEIL_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool);

    let user = service
        .register(&args.email, &args.password, &args.name)
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);

    Ok(())
}
