//! Apprenticeship listing domain model.

use chrono::NaiveDate;

use crate::model::apprenticeship::ApprenticeshipDto;

/// Site a listing was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprenticeshipSource {
    FindAnApprenticeship,
    HigherIn,
}

impl ApprenticeshipSource {
    /// Name stored alongside each listing.
    pub fn name(self) -> &'static str {
        match self {
            Self::FindAnApprenticeship => "Find an Apprenticeship",
            Self::HigherIn => "Higher In",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Self::FindAnApprenticeship, Self::HigherIn]
            .into_iter()
            .find(|source| source.name() == name)
    }
}

/// A scraped apprenticeship listing.
///
/// `id` is the natural key taken from the source site: the vacancy reference for Find
/// an Apprenticeship, the job id for Higher In. The record is immutable once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Apprenticeship {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub closes_on: Option<NaiveDate>,
    pub posted_on: Option<NaiveDate>,
    /// GOV.UK route name or Higher In category slug the listing was first seen under.
    pub category: String,
    pub url: String,
    pub source: ApprenticeshipSource,
}

impl Apprenticeship {
    /// Converts a stored row back into a listing.
    ///
    /// Rows with an unrecognised source are read as Find an Apprenticeship listings.
    pub fn from_entity(entity: entity::apprenticeship::Model) -> Self {
        let source = ApprenticeshipSource::from_name(&entity.source)
            .unwrap_or(ApprenticeshipSource::FindAnApprenticeship);

        Self {
            id: entity.id,
            title: entity.title,
            company: entity.company,
            location: entity.location,
            salary: entity.salary,
            closes_on: entity.closes_on,
            posted_on: entity.posted_on,
            category: entity.category,
            url: entity.url,
            source,
        }
    }

    /// Whether the listing still accepts applications on `today`.
    ///
    /// Listings without a parsed closing date are treated as open.
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        self.closes_on.is_none_or(|closes_on| closes_on >= today)
    }

    pub fn into_dto(self) -> ApprenticeshipDto {
        ApprenticeshipDto {
            id: self.id,
            title: self.title,
            company: self.company,
            location: self.location,
            category: self.category,
            salary: self.salary,
            posted_on: self.posted_on,
            closes_on: self.closes_on,
            url: self.url,
            source: self.source.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_stored_row() {
        let listing = Apprenticeship::from_entity(test_utils::fixture::apprenticeship::entity());

        assert_eq!(listing.id, "VAC1000123456");
        assert_eq!(listing.category, "Digital");
        assert_eq!(listing.closes_on, NaiveDate::from_ymd_opt(2025, 10, 17));
        assert_eq!(listing.source, ApprenticeshipSource::FindAnApprenticeship);
    }

    #[test]
    fn source_names_round_trip() {
        for source in [
            ApprenticeshipSource::FindAnApprenticeship,
            ApprenticeshipSource::HigherIn,
        ] {
            assert_eq!(ApprenticeshipSource::from_name(source.name()), Some(source));
        }
        assert_eq!(ApprenticeshipSource::from_name("Rate My Apprenticeship"), None);
    }

    #[test]
    fn open_until_closing_day_inclusive() {
        let listing = Apprenticeship::from_entity(test_utils::fixture::apprenticeship::entity());

        assert!(listing.is_open_on(NaiveDate::from_ymd_opt(2025, 10, 17).unwrap()));
        assert!(!listing.is_open_on(NaiveDate::from_ymd_opt(2025, 10, 18).unwrap()));
    }

    #[test]
    fn listing_without_closing_date_is_open() {
        let mut listing =
            Apprenticeship::from_entity(test_utils::fixture::apprenticeship::entity());
        listing.closes_on = None;

        assert!(listing.is_open_on(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()));
    }
}
