// Internal domain types shared by stores and services
pub mod account;
pub mod auth;
pub mod transfer;

pub use account::{Account, NewAccount, Profile};
pub use auth::Claims;
pub use transfer::{NewTransferRecord, RecipientResolution, TransferRecord};
