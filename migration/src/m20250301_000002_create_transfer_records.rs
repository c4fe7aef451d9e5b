use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only ledger of completed transfers
        manager
            .create_table(
                Table::create()
                    .table(TransferRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransferRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TransferRecords::FromEmail).string().not_null())
                    .col(ColumnDef::new(TransferRecords::ToEmail).string().not_null())
                    .col(
                        ColumnDef::new(TransferRecords::ToIdentifier)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRecords::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransferRecords::Note)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(TransferRecords::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_transfer_records_sender_time")
                    .table(TransferRecords::Table)
                    .col(TransferRecords::FromEmail)
                    .col(TransferRecords::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TransferRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TransferRecords {
    Table,
    Id,
    FromEmail,
    ToEmail,
    ToIdentifier,
    Amount,
    Note,
    CreatedAt,
}
