use clap::{Args, Subcommand};

mod sweep_abandoned;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    SweepAbandoned(sweep_abandoned::SweepAbandonedArgs),
}

pub(crate) async fn run(command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::SweepAbandoned(args) => sweep_abandoned::run(args).await,
    }
}
