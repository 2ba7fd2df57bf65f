use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Apprenticeship::Table)
                    .if_not_exists()
                    .col(string(Apprenticeship::Id).primary_key())
                    .col(integer(Apprenticeship::AcademicYear))
                    .col(string(Apprenticeship::Title))
                    .col(string(Apprenticeship::Company))
                    .col(string(Apprenticeship::Location))
                    .col(string(Apprenticeship::Category))
                    .col(string(Apprenticeship::Salary))
                    .col(date_null(Apprenticeship::PostedOn))
                    .col(date_null(Apprenticeship::ClosesOn))
                    .col(string(Apprenticeship::Url))
                    .col(string(Apprenticeship::Source))
                    .col(
                        timestamp(Apprenticeship::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_apprenticeship_academic_year")
                    .table(Apprenticeship::Table)
                    .col(Apprenticeship::AcademicYear)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_apprenticeship_academic_year")
                    .table(Apprenticeship::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Apprenticeship::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Apprenticeship {
    Table,
    Id,
    AcademicYear,
    Title,
    Company,
    Location,
    Category,
    Salary,
    PostedOn,
    ClosesOn,
    Url,
    Source,
    CreatedAt,
}
