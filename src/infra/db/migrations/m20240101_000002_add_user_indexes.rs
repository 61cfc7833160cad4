//! Migration: Soft delete filtering index and active-email uniqueness.

use sea_orm_migration::prelude::*;

/// Partial index: only live rows compete for an email address.
/// Same syntax on PostgreSQL and SQLite.
const CREATE_ACTIVE_EMAIL_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email_active ON users (email) WHERE deleted_at IS NULL";

const DROP_ACTIVE_EMAIL_INDEX: &str = "DROP INDEX IF EXISTS idx_users_email_active";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_deleted_at")
                    .table(Users::Table)
                    .col(Users::DeletedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(CREATE_ACTIVE_EMAIL_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DROP_ACTIVE_EMAIL_INDEX)
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_deleted_at")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    DeletedAt,
}
