use chrono::{DateTime, Utc};

use crate::errors::InternalError;
use crate::types::db::transfer_record;
use crate::types::internal::account::Account;

/// A completed, immutable transfer between two accounts
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRecord {
    pub id: i64,
    pub from_email: String,
    pub to_email: String,
    pub to_identifier: String,
    pub amount: i64,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<transfer_record::Model> for TransferRecord {
    type Error = InternalError;

    fn try_from(model: transfer_record::Model) -> Result<Self, Self::Error> {
        let created_at = DateTime::from_timestamp(model.created_at, 0).ok_or_else(|| {
            InternalError::parse("timestamp", format!("Invalid created_at: {}", model.created_at))
        })?;

        Ok(Self {
            id: model.id,
            from_email: model.from_email,
            to_email: model.to_email,
            to_identifier: model.to_identifier,
            amount: model.amount,
            note: model.note,
            created_at,
        })
    }
}

/// A validated transfer ready to be applied by the store
#[derive(Debug, Clone)]
pub struct NewTransferRecord {
    pub from_email: String,
    pub to_email: String,
    pub to_identifier: String,
    pub amount: i64,
    pub note: String,
}

/// Outcome of looking up a transfer recipient
///
/// Member codes are tried before emails, so an identifier that is both
/// resolves as a member code.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipientResolution {
    ResolvedByCode(Account),
    ResolvedByEmail(Account),
    Unresolved,
}

impl RecipientResolution {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ResolvedByCode(_) => "member_code",
            Self::ResolvedByEmail(_) => "email",
            Self::Unresolved => "unresolved",
        }
    }

    pub fn into_account(self) -> Option<Account> {
        match self {
            Self::ResolvedByCode(account) | Self::ResolvedByEmail(account) => Some(account),
            Self::Unresolved => None,
        }
    }
}
