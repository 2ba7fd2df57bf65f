use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SoftBan::Table)
                    .if_not_exists()
                    .col(pk_auto(SoftBan::Id))
                    .col(string(SoftBan::GuildId))
                    .col(string(SoftBan::UserId))
                    .col(string(SoftBan::ActorId))
                    .col(string(SoftBan::Reason))
                    .col(integer(SoftBan::Days))
                    .col(
                        timestamp(SoftBan::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SoftBan::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SoftBan {
    Table,
    Id,
    GuildId,
    UserId,
    ActorId,
    Reason,
    Days,
    CreatedAt,
}
