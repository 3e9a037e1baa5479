use clap::{Parser, Subcommand};

mod db;
mod sessions;

#[derive(Debug, Parser)]
#[command(name = "swatch-app", about = "Swatch CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Sessions(sessions::SessionsCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Sessions(command) => sessions::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
