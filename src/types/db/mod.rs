// Database entities - SeaORM models
pub mod account;
pub mod transfer_record;
