use thiserror::Error;

/// Contract-level failures reported by an account store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Uniqueness violation on `email` or `member_code`
    #[error("Conflict on {field}: {value}")]
    Conflict { field: &'static str, value: String },
}

impl StoreError {
    pub fn account_not_found(key: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "account",
            key: key.into(),
        }
    }
}
