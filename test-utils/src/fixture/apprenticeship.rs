//! Apprenticeship listing fixtures.
//!
//! The Find an Apprenticeship HTML mirrors a GOV.UK search results page: one
//! `li.das-search-results__list-item` per vacancy containing a results link and a
//! series of `p.govuk-body` paragraphs. The Higher In pages carry their results as JSON
//! assigned to `window.__RMP_SEARCH_RESULTS_INITIAL_STATE__` in an inline script.

use chrono::{NaiveDate, TimeZone, Utc};
use entity::apprenticeship;

/// A results page with three listings.
///
/// 1. A fully populated listing with a dated closing paragraph
/// 2. A listing whose closing and posted dates carry no year
/// 3. A malformed listing with no results link
pub const LISTING_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<body>
<main class="govuk-main-wrapper">
  <ul class="das-search-results__list">
    <li class="das-search-results__list-item">
      <h2 class="govuk-heading-m">
        <a class="das-search-results__link" href="/apprenticeship/VAC1000123456">Software Developer Apprentice</a>
      </h2>
      <p class="govuk-body">Acme Digital Ltd</p>
      <p class="govuk-body">Manchester (M1 1AA)</p>
      <p class="govuk-body"><strong>Wage</strong> £22,000 a year</p>
      <p class="govuk-body das-!-color-dark-grey">Closes in 5 days (Friday 17 October 2025 at 11:59pm)</p>
      <p class="govuk-body das-!-color-dark-grey">Posted 3 October 2025</p>
    </li>
    <li class="das-search-results__list-item">
      <h2 class="govuk-heading-m">
        <a class="das-search-results__link" href="/apprenticeship/VAC1000654321">Data Analyst Level 6</a>
      </h2>
      <p class="govuk-body">Northwind Analytics</p>
      <p class="govuk-body">Leeds (LS1 4AP)</p>
      <p class="govuk-body"><strong>Wage</strong> Competitive</p>
      <p class="govuk-body das-!-color-dark-grey">Closes on Monday 5 January</p>
      <p class="govuk-body das-!-color-dark-grey">Posted 1 December</p>
    </li>
    <li class="das-search-results__list-item">
      <h2 class="govuk-heading-m">Listing withdrawn</h2>
      <p class="govuk-body">Unknown employer</p>
    </li>
  </ul>
</main>
</body>
</html>"#;

/// A results page past the last page of a category.
pub const EMPTY_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<body>
<main class="govuk-main-wrapper">
  <p class="govuk-body">No apprenticeships match your search.</p>
</main>
</body>
</html>"#;

/// Builds a results page containing one minimal listing per id.
///
/// # Arguments
/// - `ids` - Vacancy references to place in the listing links
///
/// # Returns
/// - `String` - HTML for the page
pub fn page_with_ids(ids: &[&str]) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li class="das-search-results__list-item">
  <a class="das-search-results__link" href="/apprenticeship/{id}">Apprentice {id}</a>
  <p class="govuk-body">Employer {id}</p>
  <p class="govuk-body">London</p>
  <p class="govuk-body">Wage £18,000 a year</p>
</li>"#
            )
        })
        .collect();

    format!(
        r#"<html><body><ul class="das-search-results__list">{}</ul></body></html>"#,
        items
    )
}

/// A Higher In category page with three jobs.
///
/// 1. A job with a numeric id, an ISO deadline and a list of locations
/// 2. A job with a string id and an ordinal deadline
/// 3. A job without an id
pub const HIGHERIN_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<script>
window.__RMP_SEARCH_RESULTS_INITIAL_STATE__ = {"total":3,"data":[{"id":48213,"jobTitle":"Software Engineering Degree Apprenticeship","companyName":"Globex","smallLogo":"https://cdn.example.com/globex.png","jobLocationNames":["London","Bristol"],"salary":"£24,000","url":"https://www.higherin.com/globex/jobs/48213","deadline":"2026-03-01","relevantFor":["3rd-year"]},{"id":"48990","jobTitle":"Cyber Security Apprentice","companyName":"Initech","jobLocationNames":"Reading","url":"https://www.higherin.com/initech/jobs/48990","deadline":"1st March 2026"},{"jobTitle":"Withdrawn role","companyName":"Nobody"}]};
</script>
</head>
<body><div id="search-results"></div></body>
</html>"#;

/// Builds a Higher In category page containing one minimal job per id.
///
/// # Arguments
/// - `ids` - Job ids to place in the embedded results
///
/// # Returns
/// - `String` - HTML for the page
pub fn higherin_page_with_ids(ids: &[&str]) -> String {
    let jobs = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"id":"{id}","jobTitle":"Apprentice {id}","companyName":"Employer {id}","url":"https://www.higherin.com/jobs/{id}"}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "<html><head><script>\nwindow.__RMP_SEARCH_RESULTS_INITIAL_STATE__ = {{\"data\":[{}]}};</script></head><body></body></html>",
        jobs
    )
}

/// Creates an in-memory listing model.
///
/// # Default Values
/// - id: `"VAC1000123456"`
/// - academic_year: `2026`
/// - category: `"Digital"`
/// - closes_on: 17 October 2025
pub fn entity() -> apprenticeship::Model {
    apprenticeship::Model {
        id: "VAC1000123456".to_string(),
        academic_year: 2026,
        title: "Software Developer Apprentice".to_string(),
        company: "Acme Digital Ltd".to_string(),
        location: "Manchester (M1 1AA)".to_string(),
        category: "Digital".to_string(),
        salary: "£22,000 a year".to_string(),
        posted_on: NaiveDate::from_ymd_opt(2025, 10, 3),
        closes_on: NaiveDate::from_ymd_opt(2025, 10, 17),
        url: "https://www.findapprenticeship.service.gov.uk/apprenticeship/VAC1000123456"
            .to_string(),
        source: "Find an Apprenticeship".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 10, 4, 9, 0, 0).unwrap(),
    }
}
