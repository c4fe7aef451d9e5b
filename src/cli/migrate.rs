use crate::config::{ServerSettings, connect_database, migrate_database};
use crate::errors::InternalError;

/// Connect to the configured database and apply pending migrations
///
/// Does not load secrets or build services.
pub async fn run_migrations(settings: &ServerSettings) -> Result<(), InternalError> {
    tracing::info!("Running database migrations...");

    let db = connect_database(&settings.database_url).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
