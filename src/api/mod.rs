// API layer - HTTP endpoints
pub mod auth;
pub mod health;
pub mod points;

use std::sync::Arc;

use poem::Route;
use poem_openapi::OpenApiService;

pub use auth::{AuthApi, BearerAuth};
pub use health::HealthApi;
pub use points::PointsApi;

use crate::services::AuthLedgerService;

/// Compose the OpenAPI service under `/api` and Swagger UI under `/swagger`
pub fn build_routes(service: Arc<AuthLedgerService>, server_url: &str) -> Route {
    let api_service = OpenApiService::new(
        (HealthApi, AuthApi::new(service.clone()), PointsApi::new(service)),
        "Points Ledger API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}
