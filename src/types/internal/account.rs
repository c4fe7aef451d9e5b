use std::fmt;

use chrono::{DateTime, Utc};

use crate::errors::InternalError;
use crate::types::db::account;

/// A registered account holding a point balance
///
/// `email` is fixed at creation; `points` is never negative.
#[derive(Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub member_code: Option<String>,
    /// Output of the credential hasher; never leaves the service layer
    pub credential_digest: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birthday: String,
    pub created_at: DateTime<Utc>,
    pub points: i64,
}

impl TryFrom<account::Model> for Account {
    type Error = InternalError;

    fn try_from(model: account::Model) -> Result<Self, Self::Error> {
        let created_at = DateTime::from_timestamp(model.created_at, 0).ok_or_else(|| {
            InternalError::parse("timestamp", format!("Invalid created_at: {}", model.created_at))
        })?;

        Ok(Self {
            id: model.id,
            email: model.email,
            member_code: model.member_code,
            credential_digest: model.credential_digest,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            birthday: model.birthday,
            created_at,
            points: model.points,
        })
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("member_code", &self.member_code)
            .field("credential_digest", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}

/// Input for creating an account row
#[derive(Clone)]
pub struct NewAccount {
    pub email: String,
    pub member_code: Option<String>,
    pub credential_digest: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birthday: String,
    pub points: i64,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("member_code", &self.member_code)
            .field("credential_digest", &"<redacted>")
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}

/// Profile fields accepted at registration
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birthday: String,
}
