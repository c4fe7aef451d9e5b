use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::{DatabaseError, LedgerError, StoreError};
use crate::types::db::{account, transfer_record};
use crate::types::internal::{Account, NewAccount, NewTransferRecord, TransferRecord};

/// Durable storage of accounts and transfer records
///
/// Lookups that find nothing fail with `StoreError::NotFound`; uniqueness
/// violations on `email` or `member_code` fail with `StoreError::Conflict`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create(&self, account: NewAccount) -> Result<Account, InternalError>;

    async fn get_by_email(&self, email: &str) -> Result<Account, InternalError>;

    async fn get_by_member_code(&self, code: &str) -> Result<Account, InternalError>;

    /// Persist profile fields and member code of an existing account
    ///
    /// The row is matched on `email`, which never changes. Balances are
    /// not written here; they only move through `apply_transfer`.
    async fn update(&self, account: &Account) -> Result<(), InternalError>;

    async fn create_transfer_record(
        &self,
        record: NewTransferRecord,
    ) -> Result<TransferRecord, InternalError>;

    /// Distinct recipients of `sender_email`, most recently paid first
    async fn recent_recipients(
        &self,
        sender_email: &str,
        limit: u64,
    ) -> Result<Vec<Account>, InternalError>;

    /// Debit the sender, credit the recipient and append the record as one unit
    ///
    /// Either all three writes become visible or none do.
    async fn apply_transfer(&self, transfer: NewTransferRecord) -> Result<TransferRecord, InternalError>;
}

/// SeaORM-backed account store
pub struct SeaOrmAccountStore {
    db: DatabaseConnection,
}

impl SeaOrmAccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert_record(
        conn: &impl ConnectionTrait,
        record: NewTransferRecord,
    ) -> Result<TransferRecord, InternalError> {
        let new_record = transfer_record::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            from_email: Set(record.from_email),
            to_email: Set(record.to_email),
            to_identifier: Set(record.to_identifier),
            amount: Set(record.amount),
            note: Set(record.note),
            created_at: Set(Utc::now().timestamp()),
        };

        let model = new_record
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_transfer_record", e))?;

        TransferRecord::try_from(model)
    }

    async fn current_points(conn: &impl ConnectionTrait, email: &str) -> Result<Option<i64>, InternalError> {
        let points: Option<i64> = account::Entity::find()
            .select_only()
            .column(account::Column::Points)
            .filter(account::Column::Email.eq(email))
            .into_tuple()
            .one(conn)
            .await
            .map_err(|e| InternalError::database("read_points", e))?;

        Ok(points)
    }
}

/// Map a failed write, turning unique-index violations into conflicts
fn map_write_error(operation: &str, err: DbErr, account: &str, member_code: Option<&str>) -> InternalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            if message.contains("member_code") {
                StoreError::Conflict {
                    field: "member_code",
                    value: member_code.unwrap_or_default().to_string(),
                }
                .into()
            } else {
                StoreError::Conflict {
                    field: "email",
                    value: account.to_string(),
                }
                .into()
            }
        }
        _ => InternalError::database(operation, err),
    }
}

#[async_trait]
impl AccountStore for SeaOrmAccountStore {
    async fn create(&self, new_account: NewAccount) -> Result<Account, InternalError> {
        let email = new_account.email.clone();
        let member_code = new_account.member_code.clone();

        let model = account::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(new_account.email),
            member_code: Set(new_account.member_code),
            credential_digest: Set(new_account.credential_digest),
            first_name: Set(new_account.first_name),
            last_name: Set(new_account.last_name),
            phone: Set(new_account.phone),
            birthday: Set(new_account.birthday),
            created_at: Set(Utc::now().timestamp()),
            points: Set(new_account.points),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_write_error("create_account", e, &email, member_code.as_deref()))?;

        tracing::debug!("Created account {}", model.id);

        Account::try_from(model)
    }

    async fn get_by_email(&self, email: &str) -> Result<Account, InternalError> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_by_email", e))?
            .ok_or_else(|| StoreError::account_not_found(email))?;

        Account::try_from(model)
    }

    async fn get_by_member_code(&self, code: &str) -> Result<Account, InternalError> {
        let model = account::Entity::find()
            .filter(account::Column::MemberCode.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_by_member_code", e))?
            .ok_or_else(|| StoreError::account_not_found(code))?;

        Account::try_from(model)
    }

    async fn update(&self, updated: &Account) -> Result<(), InternalError> {
        let result = account::Entity::update_many()
            .col_expr(account::Column::MemberCode, Expr::value(updated.member_code.clone()))
            .col_expr(account::Column::FirstName, Expr::value(updated.first_name.clone()))
            .col_expr(account::Column::LastName, Expr::value(updated.last_name.clone()))
            .col_expr(account::Column::Phone, Expr::value(updated.phone.clone()))
            .col_expr(account::Column::Birthday, Expr::value(updated.birthday.clone()))
            .filter(account::Column::Email.eq(&updated.email))
            .exec(&self.db)
            .await
            .map_err(|e| {
                map_write_error("update_account", e, &updated.email, updated.member_code.as_deref())
            })?;

        if result.rows_affected == 0 {
            return Err(StoreError::account_not_found(&updated.email).into());
        }

        tracing::debug!("Updated account {}", updated.id);

        Ok(())
    }

    async fn create_transfer_record(
        &self,
        record: NewTransferRecord,
    ) -> Result<TransferRecord, InternalError> {
        Self::insert_record(&self.db, record).await
    }

    async fn recent_recipients(
        &self,
        sender_email: &str,
        limit: u64,
    ) -> Result<Vec<Account>, InternalError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let ordered: Vec<(String, i64, i64)> = transfer_record::Entity::find()
            .select_only()
            .column(transfer_record::Column::ToEmail)
            .column_as(transfer_record::Column::CreatedAt.max(), "last_transfer_at")
            .column_as(transfer_record::Column::Id.max(), "last_transfer_id")
            .filter(transfer_record::Column::FromEmail.eq(sender_email))
            .group_by(transfer_record::Column::ToEmail)
            .order_by_desc(transfer_record::Column::CreatedAt.max())
            .order_by_desc(transfer_record::Column::Id.max())
            // The SQLite binder rejects values above i64::MAX
            .limit(limit.min(i64::MAX as u64))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("recent_recipients", e))?;

        if ordered.is_empty() {
            return Ok(Vec::new());
        }

        let emails: Vec<String> = ordered.iter().map(|(email, _, _)| email.clone()).collect();

        let mut by_email: HashMap<String, account::Model> = account::Entity::find()
            .filter(account::Column::Email.is_in(emails.clone()))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("recent_recipients", e))?
            .into_iter()
            .map(|model| (model.email.clone(), model))
            .collect();

        emails
            .into_iter()
            .filter_map(|email| by_email.remove(&email))
            .map(Account::try_from)
            .collect()
    }

    async fn apply_transfer(&self, transfer: NewTransferRecord) -> Result<TransferRecord, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source })?;

        // Conditional debit: the balance check and the decrement are one statement
        let debited = account::Entity::update_many()
            .col_expr(
                account::Column::Points,
                Expr::col(account::Column::Points).sub(transfer.amount),
            )
            .filter(account::Column::Email.eq(&transfer.from_email))
            .filter(account::Column::Points.gte(transfer.amount))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("debit_sender", e))?;

        if debited.rows_affected == 0 {
            let available = Self::current_points(&txn, &transfer.from_email).await?;
            txn.rollback()
                .await
                .map_err(|e| InternalError::database("rollback_transfer", e))?;

            return Err(match available {
                Some(available) => LedgerError::InsufficientPoints {
                    available,
                    requested: transfer.amount,
                },
                None => LedgerError::UserNotFound(transfer.from_email),
            }
            .into());
        }

        let credited = account::Entity::update_many()
            .col_expr(
                account::Column::Points,
                Expr::col(account::Column::Points).add(transfer.amount),
            )
            .filter(account::Column::Email.eq(&transfer.to_email))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("credit_recipient", e))?;

        if credited.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| InternalError::database("rollback_transfer", e))?;

            return Err(LedgerError::UserNotFound(transfer.to_email).into());
        }

        let record = Self::insert_record(&txn, transfer).await?;

        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source })?;

        tracing::debug!("Applied transfer record {}", record.id);

        Ok(record)
    }
}

impl std::fmt::Debug for SeaOrmAccountStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeaOrmAccountStore")
            .field("db", &"<connection>")
            .finish()
    }
}
