// Test utilities shared across unit tests
// Only compiled when running tests

use argon2::Params;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::{Arc, Mutex};

use crate::services::{AuthLedgerService, CredentialHasher, SessionTokenService};
use crate::stores::SeaOrmAccountStore;
use crate::types::internal::NewAccount;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";

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

/// Hasher with the cheapest Argon2 parameters so tests stay fast
pub fn test_hasher() -> CredentialHasher {
    let params = Params::new(1024, 1, 1, None).expect("Invalid test Argon2 params");
    CredentialHasher::with_params(TEST_PEPPER.to_string(), params)
}

/// Account row with a placeholder digest, for store-level tests
pub fn new_account(email: &str, member_code: Option<&str>, points: i64) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        member_code: member_code.map(str::to_string),
        credential_digest: "unused:00".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        phone: String::new(),
        birthday: String::new(),
        points,
    }
}

/// Creates a ledger service over a fresh database
///
/// Returns (db, store, service). Callers can discard what they don't need:
/// ```rust
/// let (_db, store, service) = setup_test_ledger_service().await;
/// ```
pub async fn setup_test_ledger_service() -> (
    DatabaseConnection,
    Arc<SeaOrmAccountStore>,
    AuthLedgerService,
) {
    let db = setup_test_db().await;
    let store = Arc::new(SeaOrmAccountStore::new(db.clone()));
    let service = AuthLedgerService::new(
        store.clone(),
        Arc::new(test_hasher()),
        Arc::new(SessionTokenService::new(TEST_JWT_SECRET.to_string())),
    );

    (db, store, service)
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
///
/// Environment variables are process-global, so tests that modify them
/// must run serially to avoid race conditions.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
