use thiserror::Error;

pub mod credential;
pub mod database;
pub mod ledger;
pub mod store;

pub use credential::CredentialError;
pub use database::DatabaseError;
pub use ledger::LedgerError;
pub use store::StoreError;

/// Internal error type for store and service operations
///
/// Infrastructure errors (database, parse, crypto) sit beside the domain
/// errors of each component. Not exposed via API - endpoints convert with
/// `AuthError::from_internal_error` or `PointsError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Caller-facing classification of every failure this crate can return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserExists,
    /// Also covers malformed, expired or forged tokens
    InvalidCredentials,
    UserNotFound,
    InsufficientPoints,
    InvalidAmount,
    Conflict,
    StorageError,
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        Self::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// True when a store lookup found no matching row
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotFound { .. }))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Database(_) | Self::Parse { .. } | Self::Crypto { .. } => ErrorKind::StorageError,
            Self::Store(StoreError::NotFound { .. }) => ErrorKind::UserNotFound,
            Self::Store(StoreError::Conflict { .. }) => ErrorKind::Conflict,
            Self::Credential(err) => match err {
                CredentialError::UserExists(_) => ErrorKind::UserExists,
                CredentialError::InvalidCredentials | CredentialError::InvalidToken { .. } => {
                    ErrorKind::InvalidCredentials
                }
                CredentialError::UserNotFound(_) => ErrorKind::UserNotFound,
                CredentialError::HashingFailed(_) => ErrorKind::StorageError,
            },
            Self::Ledger(err) => match err {
                LedgerError::UserNotFound(_) => ErrorKind::UserNotFound,
                LedgerError::InsufficientPoints { .. } => ErrorKind::InsufficientPoints,
                LedgerError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            },
        }
    }
}
