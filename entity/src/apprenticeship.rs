use sea_orm::entity::prelude::*;

/// A scraped apprenticeship listing, keyed by the listing's natural id.
///
/// Rows are grouped by `academic_year` so each year starts with a fresh set.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "apprenticeship")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub academic_year: i32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub salary: String,
    pub posted_on: Option<Date>,
    pub closes_on: Option<Date>,
    pub url: String,
    pub source: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
