use std::fmt;

use crate::config::EnvironmentProvider;

const JWT_SECRET: &str = "JWT_SECRET";
const PASSWORD_PEPPER: &str = "PASSWORD_PEPPER";

/// Failure to load a required secret
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

/// Loading rule for one secret held in an environment variable
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub name: &'static str,
    pub min_length: usize,
}

impl SecretConfig {
    pub const fn new(name: &'static str, min_length: usize) -> Self {
        Self { name, min_length }
    }

    fn load(&self, env: &dyn EnvironmentProvider) -> Result<String, SecretError> {
        let value = env
            .get_var(self.name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SecretError::Missing {
                secret_name: self.name.to_string(),
            })?;

        if value.len() < self.min_length {
            return Err(SecretError::InvalidLength {
                secret_name: self.name.to_string(),
                expected: self.min_length,
                actual: value.len(),
            });
        }

        Ok(value)
    }
}

/// Process-wide secrets, loaded once at startup and read-only afterwards
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: String,
}

impl SecretManager {
    pub const JWT_SECRET: SecretConfig = SecretConfig::new(JWT_SECRET, 32);
    pub const PASSWORD_PEPPER: SecretConfig = SecretConfig::new(PASSWORD_PEPPER, 16);

    /// Load and validate every secret
    ///
    /// # Errors
    /// Returns `SecretError` if any secret is missing or too short
    pub fn init(env: &dyn EnvironmentProvider) -> Result<Self, SecretError> {
        let jwt_secret = Self::JWT_SECRET.load(env)?;
        let password_pepper = Self::PASSWORD_PEPPER.load(env)?;

        tracing::debug!("Loaded {} and {}", JWT_SECRET, PASSWORD_PEPPER);

        Ok(Self {
            jwt_secret,
            password_pepper,
        })
    }

    /// Signing key for session tokens
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Pepper mixed into every credential digest
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 2 }}")
    }
}
