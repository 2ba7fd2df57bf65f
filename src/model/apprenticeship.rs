use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An open apprenticeship listing as returned by `/api/apprenticeships`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApprenticeshipDto {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub salary: String,
    pub posted_on: Option<NaiveDate>,
    pub closes_on: Option<NaiveDate>,
    pub url: String,
    pub source: String,
}
