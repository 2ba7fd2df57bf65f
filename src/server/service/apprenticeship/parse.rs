//! Results page parsing.
//!
//! Listings are `li.das-search-results__list-item` elements. Each carries a results link
//! whose last path segment is the vacancy reference, `p.govuk-body` paragraphs holding
//! the employer and location, and free-text paragraphs for wage, closing and posted
//! dates.

use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::server::{
    error::scrape::ScrapeError,
    model::apprenticeship::{Apprenticeship, ApprenticeshipSource},
    service::apprenticeship::routes::LISTING_BASE_URL,
};

const LISTING_SELECTOR: &str = "li.das-search-results__list-item";
const LINK_SELECTOR: &str = "a.das-search-results__link";
const BODY_SELECTOR: &str = "p.govuk-body";
const PARAGRAPH_SELECTOR: &str = "p";

fn selector(selector: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector,
        reason: format!("{:?}", e),
    })
}

/// Collapses an element's text nodes into single-spaced text.
fn text_of(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses the loose date phrases used on results pages.
pub struct DateParser {
    relative_days: Regex,
    time_of_day: Regex,
    day: Regex,
    year: Regex,
}

impl DateParser {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            relative_days: Regex::new(r"\d+ days")?,
            time_of_day: Regex::new(r"at \d+:\d+[ap]m")?,
            day: Regex::new(r"^\d{1,2}$")?,
            year: Regex::new(r"^\d{4}$")?,
        })
    }

    /// Parses phrases such as `Closes in 5 days (Friday 17 October 2025 at 11:59pm)`,
    /// `Closes on Monday 5 January` or `Posted 3 October 2025`.
    ///
    /// A trailing four digit token is the year, the token before it the month and the
    /// nearest one or two digit token before that the day. Without a year the date falls
    /// in the current year of `today`, or the next one if it would already have passed.
    ///
    /// # Returns
    /// - `Some(NaiveDate)` - The parsed date
    /// - `None` - The phrase holds no recognisable date
    pub fn parse(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        let cleaned = text
            .replace("Closes in", "")
            .replace("Posted", "")
            .replace("Closes on", "");
        let cleaned = self.relative_days.replace_all(&cleaned, "");
        let cleaned = self.time_of_day.replace_all(&cleaned, "");
        let cleaned = cleaned.replace(['(', ')'], "");

        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        let date = self.date_from_parts(&parts, today);

        if date.is_none() {
            tracing::debug!("Could not parse date from '{}'", text);
        }
        date
    }

    fn date_from_parts(&self, parts: &[&str], today: NaiveDate) -> Option<NaiveDate> {
        let (year, rest) = match parts.split_last() {
            Some((last, rest)) if self.year.is_match(last) => {
                (Some(last.parse::<i32>().ok()?), rest)
            }
            _ => (None, parts),
        };

        let (month, before_month) = rest.split_last()?;
        let day = before_month.iter().rev().find(|part| self.day.is_match(part))?;

        let on = |year: i32| {
            NaiveDate::parse_from_str(&format!("{} {} {}", day, month, year), "%d %B %Y").ok()
        };

        match year {
            Some(year) => on(year),
            None => {
                let date = on(today.year())?;
                if date < today {
                    date.checked_add_months(Months::new(12))
                } else {
                    Some(date)
                }
            }
        }
    }
}

/// Turns results pages into listings.
pub struct ListingParser {
    listing: Selector,
    link: Selector,
    body: Selector,
    paragraph: Selector,
    dates: DateParser,
}

impl ListingParser {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            listing: selector(LISTING_SELECTOR)?,
            link: selector(LINK_SELECTOR)?,
            body: selector(BODY_SELECTOR)?,
            paragraph: selector(PARAGRAPH_SELECTOR)?,
            dates: DateParser::new()?,
        })
    }

    /// Parses every listing on a results page.
    ///
    /// An empty result means the page held no listings, which marks the end of a
    /// route. Listings that cannot be parsed are returned as errors so the caller can
    /// log and skip them.
    ///
    /// # Arguments
    /// - `html` - Page body
    /// - `category` - Route name recorded on every listing
    /// - `today` - Reference date for dates without a year
    pub fn parse_page(
        &self,
        html: &str,
        category: &str,
        today: NaiveDate,
    ) -> Vec<Result<Apprenticeship, ScrapeError>> {
        let document = Html::parse_document(html);

        document
            .select(&self.listing)
            .map(|listing| self.parse_listing(listing, category, today))
            .collect()
    }

    fn parse_listing(
        &self,
        listing: ElementRef,
        category: &str,
        today: NaiveDate,
    ) -> Result<Apprenticeship, ScrapeError> {
        let link = listing
            .select(&self.link)
            .next()
            .ok_or(ScrapeError::MissingElement("results link"))?;
        let href = link
            .value()
            .attr("href")
            .ok_or(ScrapeError::MissingElement("link target"))?;
        let id = href
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .ok_or(ScrapeError::MissingElement("vacancy reference"))?;

        let mut body = listing.select(&self.body).map(text_of);
        let company = body.next().unwrap_or_default();
        let location = body.next().unwrap_or_default();

        let paragraph_containing = |needle: &str| {
            listing
                .select(&self.paragraph)
                .map(text_of)
                .find(|text| text.contains(needle))
        };

        Ok(Apprenticeship {
            id: id.to_string(),
            title: text_of(link),
            company,
            location,
            salary: paragraph_containing("Wage")
                .map(|text| text.replace("Wage", "").trim().to_string())
                .unwrap_or_default(),
            closes_on: paragraph_containing("Closes")
                .and_then(|text| self.dates.parse(&text, today)),
            posted_on: paragraph_containing("Posted")
                .and_then(|text| self.dates.parse(&text, today)),
            category: category.to_string(),
            url: format!("{}{}", LISTING_BASE_URL, href),
            source: ApprenticeshipSource::FindAnApprenticeship,
        })
    }
}

#[cfg(test)]
mod tests {
    use test_utils::fixture::apprenticeship::{EMPTY_PAGE_HTML, LISTING_PAGE_HTML};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_dated_phrases() {
        let parser = DateParser::new().unwrap();
        let today = date(2025, 10, 1);

        assert_eq!(
            parser.parse("Closes in 5 days (Friday 17 October 2025 at 11:59pm)", today),
            Some(date(2025, 10, 17))
        );
        assert_eq!(
            parser.parse("Closes in 5 days (17 October 2025)", today),
            Some(date(2025, 10, 17))
        );
        assert_eq!(parser.parse("Posted 3 October 2025", today), Some(date(2025, 10, 3)));
        assert_eq!(
            parser.parse("Closes on Friday 17 October 2025", today),
            Some(date(2025, 10, 17))
        );
    }

    #[test]
    fn yearless_dates_roll_forward() {
        let parser = DateParser::new().unwrap();
        let today = date(2025, 10, 1);

        assert_eq!(
            parser.parse("Closes on Monday 5 January", today),
            Some(date(2026, 1, 5))
        );
        assert_eq!(parser.parse("Posted 5 January", today), Some(date(2026, 1, 5)));
        assert_eq!(parser.parse("Posted 1 December", today), Some(date(2025, 12, 1)));
        assert_eq!(parser.parse("1 October", today), Some(date(2025, 10, 1)));
    }

    #[test]
    fn unparseable_dates_are_none() {
        let parser = DateParser::new().unwrap();
        let today = date(2025, 10, 1);

        assert_eq!(parser.parse("Closes today", today), None);
        assert_eq!(parser.parse("", today), None);
        assert_eq!(parser.parse("31 February 2025", today), None);
        assert_eq!(parser.parse("Friday October 2025", today), None);
    }

    #[test]
    fn parses_fixture_page() {
        let parser = ListingParser::new().unwrap();
        let results = parser.parse_page(LISTING_PAGE_HTML, "Digital", date(2025, 10, 1));

        assert_eq!(results.len(), 3);

        let first = results[0].as_ref().unwrap();
        assert_eq!(first.id, "VAC1000123456");
        assert_eq!(first.title, "Software Developer Apprentice");
        assert_eq!(first.company, "Acme Digital Ltd");
        assert_eq!(first.location, "Manchester (M1 1AA)");
        assert_eq!(first.salary, "£22,000 a year");
        assert_eq!(first.closes_on, Some(date(2025, 10, 17)));
        assert_eq!(first.posted_on, Some(date(2025, 10, 3)));
        assert_eq!(first.category, "Digital");
        assert_eq!(
            first.url,
            "https://www.findapprenticeship.service.gov.uk/apprenticeship/VAC1000123456"
        );

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.closes_on, Some(date(2026, 1, 5)));
        assert_eq!(second.salary, "Competitive");

        assert!(matches!(results[2], Err(ScrapeError::MissingElement(_))));
    }

    #[test]
    fn empty_page_has_no_listings() {
        let parser = ListingParser::new().unwrap();

        assert!(parser
            .parse_page(EMPTY_PAGE_HTML, "Digital", date(2025, 10, 1))
            .is_empty());
    }
}
