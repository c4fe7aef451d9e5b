use poem::{Server, listener::TcpListener};

use crate::api::build_routes;
use crate::app_data::AppData;
use crate::config::{EnvironmentProvider, ServerSettings, connect_database, migrate_database};

/// Migrate, wire services and serve HTTP until shutdown
pub async fn run_server(
    settings: &ServerSettings,
    env: &dyn EnvironmentProvider,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = connect_database(&settings.database_url).await?;
    migrate_database(&db).await?;

    let app_data = AppData::init(db, env)?;

    let bind_address = settings.bind_address();
    let server_url = format!("http://localhost:{}/api", settings.port);
    let app = build_routes(app_data.ledger_service.clone(), &server_url);

    tracing::info!("Starting server on http://{}", bind_address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", settings.port);

    Server::new(TcpListener::bind(bind_address)).run(app).await?;

    Ok(())
}
