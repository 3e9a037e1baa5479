use clap::Args;
use swatch_app::{
    database,
    domain::sessions::{PgSessionStore, SessionStore},
};

#[derive(Debug, Args)]
pub(crate) struct PurgeSessionsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: PurgeSessionsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let purged = PgSessionStore::new(pool)
        .purge_expired()
        .await
        .map_err(|error| format!("failed to purge sessions: {error}"))?;

    println!("purged {purged} expired session(s)");

    Ok(())
}
