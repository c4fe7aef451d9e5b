use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::Account;

/// Request model for account registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[oai(default)]
    #[serde(default)]
    pub firstname: String,
    #[oai(default)]
    #[serde(default)]
    pub lastname: String,
    #[oai(default)]
    #[serde(default)]
    pub phone: String,
    #[oai(default)]
    #[serde(default)]
    pub birthday: String,
}

/// Response model for a successful registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Request model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response model containing the session token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed session token
    pub token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the token expires
    pub expires_in: i64,
}

/// Public view of the authenticated account
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub email: String,
    pub member_code: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub birthday: String,
    pub points: i64,
    /// ISO 8601 creation time
    pub created_at: String,
}

impl From<Account> for MeResponse {
    fn from(account: Account) -> Self {
        Self {
            email: account.email,
            member_code: account.member_code,
            firstname: account.first_name,
            lastname: account.last_name,
            phone: account.phone,
            birthday: account.birthday,
            points: account.points,
            created_at: account.created_at.to_rfc3339(),
        }
    }
}
