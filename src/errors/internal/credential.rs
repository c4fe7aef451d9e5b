use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown email or wrong password; the two are indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    UserExists(String),

    /// Token was valid but its subject no longer has an account
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Bad signature, malformed structure or expiry
    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

impl CredentialError {
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}
