//! Higher In category pages.
//!
//! Higher In renders its search results client side from a JSON document assigned to
//! `window.__RMP_SEARCH_RESULTS_INITIAL_STATE__` in an inline script. Each category slug
//! from the sector groups has its own page; the slug is recorded as the listing's
//! category so listings classify directly against the groups.

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::server::{
    error::scrape::ScrapeError,
    model::apprenticeship::{Apprenticeship, ApprenticeshipSource},
};

/// Degree apprenticeship search, one page per category slug.
pub const BASE_URL: &str = "https://www.higherin.com/search-jobs/degree-apprenticeship/";

const STATE_MARKER: &str = "window.__RMP_SEARCH_RESULTS_INITIAL_STATE__ = ";

/// Ways the assignment is terminated, tried in order.
const STATE_ENDINGS: [&str; 3] = [";</script>", ";\n</script>", "};"];

pub fn category_url(category: &str) -> String {
    format!("{}{}", BASE_URL, category)
}

#[derive(Debug, Deserialize)]
struct SearchState {
    #[serde(default)]
    data: Vec<Job>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Job {
    id: Option<Value>,
    job_title: Option<Value>,
    company_name: Option<Value>,
    job_location_names: Option<Value>,
    salary: Option<Value>,
    url: Option<Value>,
    deadline: Option<Value>,
}

/// Renders a JSON scalar or list of scalars as text.
fn text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| text(Some(item)))
            .collect::<Vec<_>>()
            .join(", "),
        _ => return None,
    };

    Some(text).filter(|text| !text.is_empty())
}

/// Slices the results JSON out of a page.
///
/// # Returns
/// - `Ok(&str)` - The JSON object text
/// - `Err(ScrapeError::MissingElement)` - No results assignment on the page
pub fn extract_state(html: &str) -> Result<&str, ScrapeError> {
    let start = html
        .find(STATE_MARKER)
        .map(|index| index + STATE_MARKER.len())
        .ok_or(ScrapeError::MissingElement("search results state"))?;
    let rest = &html[start..];

    let end = STATE_ENDINGS
        .iter()
        .find_map(|ending| {
            rest.find(ending).map(|index| match *ending {
                "};" => index + 1,
                _ => index,
            })
        })
        .ok_or(ScrapeError::MissingElement("end of search results state"))?;

    let json = rest[..end].trim();
    if !json.starts_with('{') {
        return Err(ScrapeError::MissingElement("search results object"));
    }

    Ok(json)
}

/// Turns Higher In category pages into listings.
pub struct HigherinParser {
    ordinal_date: Regex,
}

impl HigherinParser {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            ordinal_date: Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)?\s+([A-Za-z]+)\s+(\d{4})$")?,
        })
    }

    /// Parses every job on a category page.
    ///
    /// Jobs without an id are dropped. A page whose results cannot be found or decoded
    /// is an error for the whole category.
    ///
    /// # Arguments
    /// - `html` - Page body
    /// - `category` - Category slug recorded on every listing
    pub fn parse_page(
        &self,
        html: &str,
        category: &str,
    ) -> Result<Vec<Apprenticeship>, ScrapeError> {
        let state: SearchState = serde_json::from_str(extract_state(html)?)?;

        Ok(state
            .data
            .into_iter()
            .filter_map(|job| self.listing(job, category))
            .collect())
    }

    fn listing(&self, job: Job, category: &str) -> Option<Apprenticeship> {
        let id = text(job.id.as_ref())?;

        Some(Apprenticeship {
            title: text(job.job_title.as_ref()).unwrap_or_default(),
            company: text(job.company_name.as_ref()).unwrap_or_default(),
            location: text(job.job_location_names.as_ref()).unwrap_or_default(),
            salary: text(job.salary.as_ref()).unwrap_or_default(),
            closes_on: text(job.deadline.as_ref())
                .and_then(|deadline| self.parse_deadline(&id, &deadline)),
            posted_on: None,
            category: category.to_string(),
            url: text(job.url.as_ref()).unwrap_or_default(),
            source: ApprenticeshipSource::HigherIn,
            id,
        })
    }

    /// Parses `2026-03-01`, `2026-03-01T23:59:00` or `1st March 2026`.
    pub fn parse_deadline(&self, id: &str, deadline: &str) -> Option<NaiveDate> {
        let iso = deadline.get(..10).unwrap_or(deadline);
        if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
            return Some(date);
        }

        let date = self.ordinal_date.captures(deadline.trim()).and_then(|caps| {
            let text = format!("{} {} {}", &caps[1], &caps[2], &caps[3]);
            NaiveDate::parse_from_str(&text, "%d %B %Y").ok()
        });
        if date.is_none() {
            tracing::debug!(
                "Could not parse deadline '{}' of Higher In job {}",
                deadline,
                id
            );
        }
        date
    }
}

#[cfg(test)]
mod tests {
    use test_utils::fixture::apprenticeship::{higherin_page_with_ids, HIGHERIN_PAGE_HTML};

    use super::*;
    use crate::server::model::category_group::CategoryGroup;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_fixture_page() {
        let parser = HigherinParser::new().unwrap();

        let listings = parser
            .parse_page(HIGHERIN_PAGE_HTML, "software-engineering")
            .unwrap();

        assert_eq!(listings.len(), 2);

        let first = &listings[0];
        assert_eq!(first.id, "48213");
        assert_eq!(first.title, "Software Engineering Degree Apprenticeship");
        assert_eq!(first.company, "Globex");
        assert_eq!(first.location, "London, Bristol");
        assert_eq!(first.salary, "£24,000");
        assert_eq!(first.closes_on, Some(date(2026, 3, 1)));
        assert_eq!(first.posted_on, None);
        assert_eq!(first.category, "software-engineering");
        assert_eq!(first.url, "https://www.higherin.com/globex/jobs/48213");
        assert_eq!(first.source, ApprenticeshipSource::HigherIn);

        let second = &listings[1];
        assert_eq!(second.id, "48990");
        assert_eq!(second.location, "Reading");
        assert_eq!(second.salary, "");
        assert_eq!(second.closes_on, Some(date(2026, 3, 1)));
    }

    #[test]
    fn listings_classify_by_their_category_slug() {
        let parser = HigherinParser::new().unwrap();

        let listings = parser
            .parse_page(&higherin_page_with_ids(&["1"]), "cyber-security")
            .unwrap();

        assert_eq!(
            CategoryGroup::find_groups(&listings[0].category),
            vec![CategoryGroup::Technology]
        );
    }

    #[test]
    fn page_without_results_state_is_an_error() {
        let parser = HigherinParser::new().unwrap();

        assert!(matches!(
            parser.parse_page("<html><body>Not found</body></html>", "tax"),
            Err(ScrapeError::MissingElement(_))
        ));
    }

    #[test]
    fn malformed_results_state_is_an_error() {
        let parser = HigherinParser::new().unwrap();
        let html = concat!(
            "<script>window.__RMP_SEARCH_RESULTS_INITIAL_STATE__ = ",
            "{\"data\": [};</script>"
        );

        assert!(matches!(
            parser.parse_page(html, "tax"),
            Err(ScrapeError::InvalidJson(_))
        ));
    }

    #[test]
    fn extracts_state_ending_in_brace() {
        let html = concat!(
            "<script>window.__RMP_SEARCH_RESULTS_INITIAL_STATE__ = ",
            "{\"data\":[]}; render()</script>"
        );

        assert_eq!(extract_state(html).unwrap(), "{\"data\":[]}");
    }

    #[test]
    fn deadline_formats() {
        let parser = HigherinParser::new().unwrap();

        assert_eq!(parser.parse_deadline("1", "2026-01-31"), Some(date(2026, 1, 31)));
        assert_eq!(
            parser.parse_deadline("1", "2026-01-31T23:59:00+00:00"),
            Some(date(2026, 1, 31))
        );
        assert_eq!(
            parser.parse_deadline("1", "22nd February 2026"),
            Some(date(2026, 2, 22))
        );
        assert_eq!(parser.parse_deadline("1", "3 April 2026"), Some(date(2026, 4, 3)));
        assert_eq!(parser.parse_deadline("1", "Rolling"), None);
    }

    #[test]
    fn category_url_appends_slug() {
        assert_eq!(
            category_url("tax"),
            "https://www.higherin.com/search-jobs/degree-apprenticeship/tax"
        );
    }
}
