//! Apprenticeship listing factory.

use crate::factory::helpers::next_id;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating stored apprenticeship listings.
///
/// # Example
///
/// ```rust,ignore
/// let listing = ApprenticeshipFactory::new(&db)
///     .academic_year(2026)
///     .closes_on(NaiveDate::from_ymd_opt(2026, 3, 1))
///     .build()
///     .await?;
/// ```
pub struct ApprenticeshipFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    academic_year: i32,
    title: String,
    category: String,
    closes_on: Option<NaiveDate>,
}

impl<'a> ApprenticeshipFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - id: `"VAC{id}"`
    /// - academic_year: `2026`
    /// - title: `"Apprentice {id}"`
    /// - category: `"Digital"`
    /// - closes_on: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: format!("VAC{}", id),
            academic_year: 2026,
            title: format!("Apprentice {}", id),
            category: "Digital".to_string(),
            closes_on: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn academic_year(mut self, academic_year: i32) -> Self {
        self.academic_year = academic_year;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn closes_on(mut self, closes_on: Option<NaiveDate>) -> Self {
        self.closes_on = closes_on;
        self
    }

    /// Builds and inserts the listing.
    pub async fn build(self) -> Result<entity::apprenticeship::Model, DbErr> {
        entity::apprenticeship::ActiveModel {
            url: ActiveValue::Set(format!(
                "https://www.findapprenticeship.service.gov.uk/apprenticeship/{}",
                self.id
            )),
            id: ActiveValue::Set(self.id),
            academic_year: ActiveValue::Set(self.academic_year),
            title: ActiveValue::Set(self.title),
            company: ActiveValue::Set("Acme Ltd".to_string()),
            location: ActiveValue::Set("London".to_string()),
            category: ActiveValue::Set(self.category),
            salary: ActiveValue::Set("£20,000 a year".to_string()),
            posted_on: ActiveValue::Set(None),
            closes_on: ActiveValue::Set(self.closes_on),
            source: ActiveValue::Set("Find an Apprenticeship".to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a listing with default values.
pub async fn create_apprenticeship(
    db: &DatabaseConnection,
) -> Result<entity::apprenticeship::Model, DbErr> {
    ApprenticeshipFactory::new(db).build().await
}
