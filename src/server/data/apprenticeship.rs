//! Apprenticeship repository, the system of record for scraped listings.
//!
//! Listings are partitioned by academic year. The sync job loads the ids already stored
//! for the current year to decide which scraped listings are new, and inserts only those.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::model::apprenticeship::Apprenticeship;

pub struct ApprenticeshipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApprenticeshipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the ids of every listing stored for an academic year.
    ///
    /// # Arguments
    /// - `academic_year` - Calendar year in which the academic year ends
    ///
    /// # Returns
    /// - `Ok(HashSet<String>)` - Stored listing ids, empty when none
    /// - `Err(DbErr)` - Database error during query
    pub async fn existing_ids(&self, academic_year: i32) -> Result<HashSet<String>, DbErr> {
        let ids: Vec<String> = entity::prelude::Apprenticeship::find()
            .select_only()
            .column(entity::apprenticeship::Column::Id)
            .filter(entity::apprenticeship::Column::AcademicYear.eq(academic_year))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(ids.into_iter().collect())
    }

    /// Inserts new listings under an academic year.
    ///
    /// Callers filter against `existing_ids` first; a duplicate id fails the whole insert.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of listings inserted
    /// - `Err(DbErr)` - Database error during insert
    pub async fn insert_many(
        &self,
        academic_year: i32,
        listings: &[Apprenticeship],
    ) -> Result<usize, DbErr> {
        if listings.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let models = listings
            .iter()
            .map(|listing| entity::apprenticeship::ActiveModel {
                id: ActiveValue::Set(listing.id.clone()),
                academic_year: ActiveValue::Set(academic_year),
                title: ActiveValue::Set(listing.title.clone()),
                company: ActiveValue::Set(listing.company.clone()),
                location: ActiveValue::Set(listing.location.clone()),
                category: ActiveValue::Set(listing.category.clone()),
                salary: ActiveValue::Set(listing.salary.clone()),
                posted_on: ActiveValue::Set(listing.posted_on),
                closes_on: ActiveValue::Set(listing.closes_on),
                url: ActiveValue::Set(listing.url.clone()),
                source: ActiveValue::Set(listing.source.name().to_string()),
                created_at: ActiveValue::Set(now),
            })
            .collect::<Vec<_>>();

        entity::prelude::Apprenticeship::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(listings.len())
    }

    /// Gets every listing still open on `today`, soonest closing first.
    ///
    /// Listings without a closing date are included after the dated ones.
    pub async fn get_active(&self, today: NaiveDate) -> Result<Vec<Apprenticeship>, DbErr> {
        let entities = entity::prelude::Apprenticeship::find()
            .filter(
                Condition::any()
                    .add(entity::apprenticeship::Column::ClosesOn.gte(today))
                    .add(entity::apprenticeship::Column::ClosesOn.is_null()),
            )
            .order_by_asc(entity::apprenticeship::Column::ClosesOn)
            .order_by_asc(entity::apprenticeship::Column::Id)
            .all(self.db)
            .await?;

        let mut listings = entities
            .into_iter()
            .map(Apprenticeship::from_entity)
            .collect::<Vec<_>>();
        // SQLite sorts NULL first on ascending order
        listings.sort_by_key(|listing| listing.closes_on.is_none());

        Ok(listings)
    }
}
