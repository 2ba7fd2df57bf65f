use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditChannel::Table)
                    .if_not_exists()
                    .col(string(AuditChannel::GuildId).primary_key())
                    .col(string(AuditChannel::ChannelId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AuditChannel {
    Table,
    GuildId,
    ChannelId,
}
