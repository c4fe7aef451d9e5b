use std::sync::Arc;

use rand::Rng;

use crate::errors::InternalError;
use crate::errors::internal::{CredentialError, LedgerError, StoreError};
use crate::services::{CredentialHasher, SessionTokenService};
use crate::stores::AccountStore;
use crate::types::internal::{
    Account, NewAccount, NewTransferRecord, Profile, RecipientResolution, TransferRecord,
};

const MEMBER_CODE_LENGTH: usize = 8;
const MEMBER_CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MEMBER_CODE_ATTEMPTS: usize = 3;
/// Upper bound on `recent_recipients` page size
pub const MAX_RECIPIENT_LIMIT: u64 = 100;

/// Registration, login, identity lookup and point transfers
///
/// Each operation is a single request-scoped step; the service keeps no
/// state between calls besides its collaborators.
pub struct AuthLedgerService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<CredentialHasher>,
    tokens: Arc<SessionTokenService>,
}

impl AuthLedgerService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<CredentialHasher>,
        tokens: Arc<SessionTokenService>,
    ) -> Self {
        Self { store, hasher, tokens }
    }

    pub fn token_service(&self) -> Arc<SessionTokenService> {
        Arc::clone(&self.tokens)
    }

    /// Create an account with a zero balance
    ///
    /// No token is issued; callers log in separately.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<Account, InternalError> {
        match self.store.get_by_email(email).await {
            Ok(_) => return Err(CredentialError::UserExists(email.to_string()).into()),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        let credential_digest = self.hasher.hash(password)?;

        let account = self
            .store
            .create(NewAccount {
                email: email.to_string(),
                member_code: None,
                credential_digest,
                first_name: profile.first_name,
                last_name: profile.last_name,
                phone: profile.phone,
                birthday: profile.birthday,
                points: 0,
            })
            .await
            .map_err(|err| match err {
                // Lost a race with a concurrent registration of the same email
                InternalError::Store(StoreError::Conflict { field: "email", .. }) => {
                    CredentialError::UserExists(email.to_string()).into()
                }
                other => other,
            })?;

        tracing::info!("Registered account {}", account.id);

        Ok(account)
    }

    /// Verify credentials and issue a session token for the account email
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, InternalError> {
        let account = match self.store.get_by_email(email).await {
            Ok(account) => account,
            Err(err) if err.is_not_found() => {
                tracing::warn!("Login rejected: invalid credentials");
                return Err(CredentialError::InvalidCredentials.into());
            }
            Err(err) => return Err(err),
        };

        if !self.hasher.verify(&account.credential_digest, password) {
            tracing::warn!("Login rejected for account {}: invalid credentials", account.id);
            return Err(CredentialError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(&account.email)?;

        tracing::info!("Issued session token for account {}", account.id);

        Ok(token)
    }

    /// Resolve the account behind a session token
    pub async fn identity(&self, token: &str) -> Result<Account, InternalError> {
        let subject = self.tokens.validate(token).map_err(|err| {
            tracing::debug!("Token rejected: {}", err);
            InternalError::from(CredentialError::InvalidCredentials)
        })?;

        match self.store.get_by_email(&subject).await {
            Ok(account) => Ok(account),
            Err(err) if err.is_not_found() => Err(CredentialError::UserNotFound(subject).into()),
            Err(err) => Err(err),
        }
    }

    /// Look up a recipient by member code first, then by email
    pub async fn resolve_recipient(&self, identifier: &str) -> Result<RecipientResolution, InternalError> {
        match self.store.get_by_member_code(identifier).await {
            Ok(account) => return Ok(RecipientResolution::ResolvedByCode(account)),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        match self.store.get_by_email(identifier).await {
            Ok(account) => Ok(RecipientResolution::ResolvedByEmail(account)),
            Err(err) if err.is_not_found() => Ok(RecipientResolution::Unresolved),
            Err(err) => Err(err),
        }
    }

    /// Move `amount` points from `from_email` to the account named by `to_identifier`
    ///
    /// The debit, credit and record are applied atomically by the store; a
    /// failed transfer leaves both balances and the ledger untouched.
    pub async fn transfer(
        &self,
        from_email: &str,
        to_identifier: &str,
        amount: i64,
        note: &str,
    ) -> Result<TransferRecord, InternalError> {
        let sender = match self.store.get_by_email(from_email).await {
            Ok(account) => account,
            Err(err) if err.is_not_found() => {
                return Err(LedgerError::UserNotFound(from_email.to_string()).into());
            }
            Err(err) => return Err(err),
        };

        let resolution = self.resolve_recipient(to_identifier).await?;
        tracing::debug!("Recipient resolution: {}", resolution.label());
        let recipient = resolution.into_account().ok_or_else(|| {
            tracing::warn!("Transfer rejected: recipient not found");
            InternalError::from(LedgerError::UserNotFound(to_identifier.to_string()))
        })?;

        if amount <= 0 {
            tracing::warn!("Transfer rejected: non-positive amount {}", amount);
            return Err(LedgerError::InvalidAmount(amount).into());
        }

        if sender.points < amount {
            tracing::warn!(
                "Transfer rejected for account {}: insufficient points",
                sender.id
            );
            return Err(LedgerError::InsufficientPoints {
                available: sender.points,
                requested: amount,
            }
            .into());
        }

        let record = self
            .store
            .apply_transfer(NewTransferRecord {
                from_email: sender.email,
                to_email: recipient.email,
                to_identifier: to_identifier.to_string(),
                amount,
                note: note.to_string(),
            })
            .await?;

        tracing::info!(
            "Transferred {} points (record {}) from account {} to account {}",
            record.amount,
            record.id,
            sender.id,
            recipient.id
        );

        Ok(record)
    }

    /// Distinct recipients of `sender_email`, most recent first
    ///
    /// `limit` is capped at `MAX_RECIPIENT_LIMIT`.
    pub async fn recent_recipients(
        &self,
        sender_email: &str,
        limit: u64,
    ) -> Result<Vec<Account>, InternalError> {
        self.store
            .recent_recipients(sender_email, limit.min(MAX_RECIPIENT_LIMIT))
            .await
    }

    /// Give an account a member code if it has none, returning the code
    pub async fn assign_member_code(&self, email: &str) -> Result<String, InternalError> {
        let mut account = self.store.get_by_email(email).await?;
        if let Some(code) = account.member_code {
            return Ok(code);
        }

        let mut last_err = None;
        for _ in 0..MEMBER_CODE_ATTEMPTS {
            let code = generate_member_code();
            account.member_code = Some(code.clone());

            match self.store.update(&account).await {
                Ok(()) => {
                    tracing::info!("Assigned member code to account {}", account.id);
                    return Ok(code);
                }
                Err(InternalError::Store(StoreError::Conflict { field, value })) => {
                    tracing::debug!("Member code collision, retrying");
                    last_err = Some(StoreError::Conflict { field, value });
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_err
            .unwrap_or(StoreError::Conflict {
                field: "member_code",
                value: String::new(),
            })
            .into())
    }
}

fn generate_member_code() -> String {
    let mut rng = rand::rng();
    (0..MEMBER_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..MEMBER_CODE_CHARSET.len());
            MEMBER_CODE_CHARSET[idx] as char
        })
        .collect()
}

impl std::fmt::Debug for AuthLedgerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthLedgerService")
            .field("hasher", &self.hasher)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
