use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModerationAction::Table)
                    .if_not_exists()
                    .col(pk_auto(ModerationAction::Id))
                    .col(string(ModerationAction::Kind))
                    .col(string(ModerationAction::GuildId))
                    .col(string(ModerationAction::UserId))
                    .col(string(ModerationAction::ActorId))
                    .col(string(ModerationAction::Reason))
                    .col(timestamp_null(ModerationAction::TimeoutUntil))
                    .col(
                        timestamp(ModerationAction::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Audit views always filter by guild, user and kind together
        manager
            .create_index(
                Index::create()
                    .name("idx_moderation_action_guild_user_kind")
                    .table(ModerationAction::Table)
                    .col(ModerationAction::GuildId)
                    .col(ModerationAction::UserId)
                    .col(ModerationAction::Kind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_moderation_action_guild_user_kind")
                    .table(ModerationAction::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ModerationAction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ModerationAction {
    Table,
    Id,
    Kind,
    GuildId,
    UserId,
    ActorId,
    Reason,
    TimeoutUntil,
    CreatedAt,
}
