use clap::{Args, Subcommand};

mod sweep;

#[derive(Debug, Args)]
pub(crate) struct SessionsCommand {
    #[command(subcommand)]
    command: SessionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionsSubcommand {
    Sweep(sweep::SweepArgs),
}

pub(crate) async fn run(command: SessionsCommand) -> Result<(), String> {
    match command.command {
        SessionsSubcommand::Sweep(args) => sweep::run(args).await,
    }
}
