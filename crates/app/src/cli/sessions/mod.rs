use clap::{Args, Subcommand};

mod purge;

#[derive(Debug, Args)]
pub(crate) struct SessionsCommand {
    #[command(subcommand)]
    command: SessionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionsSubcommand {
    /// Delete expired visitor sessions
    Purge(purge::PurgeSessionsArgs),
}

pub(crate) async fn run(command: SessionsCommand) -> Result<(), String> {
    match command.command {
        SessionsSubcommand::Purge(args) => purge::run(args).await,
    }
}
