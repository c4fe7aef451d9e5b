// Services layer - Business logic and orchestration
pub mod credential_hasher;
pub mod ledger_service;
pub mod token_service;

pub use credential_hasher::CredentialHasher;
pub use ledger_service::AuthLedgerService;
pub use token_service::SessionTokenService;
