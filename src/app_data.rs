use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{EnvironmentProvider, SecretManager};
use crate::errors::InternalError;
use crate::services::{AuthLedgerService, CredentialHasher, SessionTokenService};
use crate::stores::{AccountStore, SeaOrmAccountStore};

/// Long-lived application dependencies, created once at startup
///
/// ```text
/// AppData::init(db, env)
///   ├─ secret_manager   (JWT_SECRET, PASSWORD_PEPPER)
///   ├─ account_store    (SeaOrmAccountStore over db)
///   └─ ledger_service   (store + CredentialHasher + SessionTokenService)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub secret_manager: Arc<SecretManager>,
    pub account_store: Arc<dyn AccountStore>,
    pub ledger_service: Arc<AuthLedgerService>,
}

impl AppData {
    /// Build every long-lived dependency
    ///
    /// The database should already be migrated.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when a secret is missing or invalid
    pub fn init(db: DatabaseConnection, env: &dyn EnvironmentProvider) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let secret_manager = Arc::new(SecretManager::init(env).map_err(|e| {
            InternalError::parse("secret_manager", format!("Secret manager init failed: {}", e))
        })?);
        tracing::debug!("{}", secret_manager);

        let account_store: Arc<dyn AccountStore> = Arc::new(SeaOrmAccountStore::new(db.clone()));
        let hasher = Arc::new(CredentialHasher::new(
            secret_manager.password_pepper().to_string(),
        ));
        let tokens = Arc::new(SessionTokenService::new(
            secret_manager.jwt_secret().to_string(),
        ));
        let ledger_service = Arc::new(AuthLedgerService::new(
            account_store.clone(),
            hasher,
            tokens,
        ));

        tracing::info!("AppData initialized");

        Ok(Self {
            db,
            secret_manager,
            account_store,
            ledger_service,
        })
    }
}
