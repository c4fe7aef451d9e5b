use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Sender or recipient could not be resolved
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Insufficient points: requested {requested}, available {available}")]
    InsufficientPoints { available: i64, requested: i64 },

    #[error("Transfer amount must be positive, got {0}")]
    InvalidAmount(i64),
}
