use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OauthUser::Table)
                    .if_not_exists()
                    .col(string(OauthUser::DiscordId).primary_key())
                    .col(string(OauthUser::Name))
                    .col(string(OauthUser::AccessToken))
                    .col(string_null(OauthUser::RefreshToken))
                    .col(timestamp_null(OauthUser::ExpiresAt))
                    .col(
                        timestamp(OauthUser::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OauthUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OauthUser {
    Table,
    DiscordId,
    Name,
    AccessToken,
    RefreshToken,
    ExpiresAt,
    UpdatedAt,
}
