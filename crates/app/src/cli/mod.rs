use clap::{Parser, Subcommand};

mod catalog;
mod db;
mod orders;
mod sessions;
mod user;

#[derive(Debug, Parser)]
#[command(name = "vermeil", about = "Vermeil CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Catalog(catalog::CatalogCommand),
    Sessions(sessions::SessionsCommand),
    Orders(orders::OrdersCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Catalog(command) => catalog::run(command).await,
            Commands::Sessions(command) => sessions::run(command).await,
            Commands::Orders(command) => orders::run(command).await,
        }
    }
}
