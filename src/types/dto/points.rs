use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::{Account, TransferRecord};

/// Request model for a points transfer
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Recipient member code or email
    pub to: String,
    pub amount: i64,
    #[oai(default)]
    #[serde(default)]
    pub note: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TransferResponse {
    pub id: i64,
    pub from_email: String,
    pub to_email: String,
    pub to_identifier: String,
    pub amount: i64,
    pub note: String,
    pub created_at: String,
}

impl From<TransferRecord> for TransferResponse {
    fn from(record: TransferRecord) -> Self {
        Self {
            id: record.id,
            from_email: record.from_email,
            to_email: record.to_email,
            to_identifier: record.to_identifier,
            amount: record.amount,
            note: record.note,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// A previously paid account, without balance information
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RecipientResponse {
    pub email: String,
    pub member_code: Option<String>,
    pub firstname: String,
    pub lastname: String,
}

impl From<Account> for RecipientResponse {
    fn from(account: Account) -> Self {
        Self {
            email: account.email,
            member_code: account.member_code,
            firstname: account.first_name,
            lastname: account.last_name,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MemberCodeResponse {
    pub member_code: String,
}
