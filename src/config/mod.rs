pub mod database;
mod env_provider;
pub mod logging;
mod secret_manager;
mod settings;

pub use database::{connect_database, migrate_database};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use logging::{LoggingConfig, LoggingError, init_logging};
pub use secret_manager::{SecretConfig, SecretError, SecretManager};
pub use settings::{ServerSettings, SettingsError};
