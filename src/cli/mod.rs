// CLI entry points for the server binary

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::{EnvironmentProvider, ServerSettings};

/// Points ledger backend
#[derive(Parser, Debug)]
#[command(name = "pointsledger")]
#[command(about = "Points ledger authentication backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run migrations and start the HTTP server
    Serve,

    /// Run pending database migrations and exit
    Migrate,
}

/// Route the parsed command to its handler
pub async fn execute_command(
    cli: Cli,
    env: &dyn EnvironmentProvider,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = ServerSettings::from_env(env)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_server(&settings, env).await?,
        Commands::Migrate => migrate::run_migrations(&settings).await?,
    }

    Ok(())
}
