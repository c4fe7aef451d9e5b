// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use argon2::Params;
use migration::{Migrator, MigratorTrait};
use pointsledger_backend::services::{AuthLedgerService, CredentialHasher, SessionTokenService};
use pointsledger_backend::stores::SeaOrmAccountStore;
use pointsledger_backend::types::db::transfer_record::Entity as TransferRecordEntity;
use sea_orm::{Database, DatabaseConnection, EntityTrait, PaginatorTrait};

pub const TEST_JWT_SECRET: &str = "integration-secret-key-minimum-32-chars";
pub const TEST_PEPPER: &str = "integration-pepper-16";

/// Creates an in-memory database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Ledger service over a fresh database, with cheap hashing parameters
///
/// Returns (db, store, service).
pub async fn setup_ledger() -> (DatabaseConnection, Arc<SeaOrmAccountStore>, Arc<AuthLedgerService>) {
    let db = setup_test_db().await;
    let store = Arc::new(SeaOrmAccountStore::new(db.clone()));
    let params = Params::new(1024, 1, 1, None).expect("Invalid test Argon2 params");
    let service = Arc::new(AuthLedgerService::new(
        store.clone(),
        Arc::new(CredentialHasher::with_params(TEST_PEPPER.to_string(), params)),
        Arc::new(SessionTokenService::new(TEST_JWT_SECRET.to_string())),
    ));

    (db, store, service)
}

pub async fn transfer_record_count(db: &DatabaseConnection) -> u64 {
    TransferRecordEntity::find()
        .count(db)
        .await
        .expect("Failed to count transfer records")
}

/// Helper to manage environment variables in tests
///
/// Cleans up specified environment variables on creation and drop,
/// ensuring test isolation when dealing with global environment state.
pub struct EnvGuard {
    vars: Vec<String>,
}

impl EnvGuard {
    pub fn new(vars: Vec<&str>) -> Self {
        for var in &vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
        Self {
            vars: vars.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }
}

/// Global mutex for tests that modify environment variables
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
