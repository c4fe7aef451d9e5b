use clap::Parser;

use pointsledger_backend::cli::{Cli, execute_command};
use pointsledger_backend::config::{LoggingConfig, SystemEnvironment, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let env = SystemEnvironment;
    init_logging(&LoggingConfig::from_env(&env))?;

    let cli = Cli::parse();

    if let Err(e) = execute_command(cli, &env).await {
        tracing::error!("{}", e);
        return Err(e);
    }

    Ok(())
}
