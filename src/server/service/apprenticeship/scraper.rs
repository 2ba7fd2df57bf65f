//! Scraping of both listing sources.
//!
//! Find an Apprenticeship is walked route by route and page by page. Higher In is
//! fetched one page per category slug, in batches. Both feed the same id set, so a
//! listing seen twice keeps its first category.

use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::server::{
    error::scrape::ScrapeError,
    model::{apprenticeship::Apprenticeship, category_group::CategoryGroup},
    service::apprenticeship::{
        higherin::{self, HigherinParser},
        parse::ListingParser,
        routes::{Route, ROUTES},
    },
};

/// Consecutive failed fetches after which a route is abandoned.
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Higher In categories fetched between pauses.
const CATEGORY_BATCH: usize = 10;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; MystiGuardian)";

/// Fetches a results page body.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Fetches pages over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Pauses between requests.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeDelays {
    pub between_pages: Duration,
    pub between_routes: Duration,
    /// Pause between batches of Higher In categories.
    pub between_batches: Duration,
}

impl Default for ScrapeDelays {
    fn default() -> Self {
        Self {
            between_pages: Duration::from_secs(1),
            between_routes: Duration::from_secs(2),
            between_batches: Duration::from_millis(500),
        }
    }
}

impl ScrapeDelays {
    /// No pauses at all.
    pub fn none() -> Self {
        Self {
            between_pages: Duration::ZERO,
            between_routes: Duration::ZERO,
            between_batches: Duration::ZERO,
        }
    }
}

/// Every category slug once, in group declaration order.
pub fn higherin_categories() -> Vec<&'static str> {
    let mut seen = HashSet::new();
    CategoryGroup::all_categories()
        .into_iter()
        .filter(|slug| seen.insert(*slug))
        .collect()
}

pub struct Scraper<F: PageFetcher> {
    fetcher: F,
    parser: ListingParser,
    higherin: HigherinParser,
    delays: ScrapeDelays,
}

impl<F: PageFetcher> Scraper<F> {
    pub fn new(fetcher: F, delays: ScrapeDelays) -> Result<Self, ScrapeError> {
        Ok(Self {
            fetcher,
            parser: ListingParser::new()?,
            higherin: HigherinParser::new()?,
            delays,
        })
    }

    /// Scrapes every route, then every Higher In category, and returns the unique
    /// listings in the order first seen.
    pub async fn scrape_all(&self, today: NaiveDate) -> Vec<Apprenticeship> {
        let mut seen = HashSet::new();
        let mut listings = Vec::new();

        self.collect_routes(&ROUTES, today, &mut seen, &mut listings).await;
        pause(self.delays.between_routes).await;
        self.collect_categories(&higherin_categories(), &mut seen, &mut listings)
            .await;

        tracing::info!("Scraped {} unique apprenticeships", listings.len());
        listings
    }

    pub async fn scrape_routes(&self, routes: &[Route], today: NaiveDate) -> Vec<Apprenticeship> {
        let mut seen = HashSet::new();
        let mut listings = Vec::new();
        self.collect_routes(routes, today, &mut seen, &mut listings).await;
        listings
    }

    pub async fn scrape_categories(&self, categories: &[&str]) -> Vec<Apprenticeship> {
        let mut seen = HashSet::new();
        let mut listings = Vec::new();
        self.collect_categories(categories, &mut seen, &mut listings).await;
        listings
    }

    async fn collect_routes(
        &self,
        routes: &[Route],
        today: NaiveDate,
        seen: &mut HashSet<String>,
        listings: &mut Vec<Apprenticeship>,
    ) {
        tracing::info!("Scraping Find an Apprenticeship across {} routes", routes.len());

        for (i, route) in routes.iter().enumerate() {
            if i > 0 {
                pause(self.delays.between_routes).await;
            }
            self.scrape_route(route, today, seen, listings).await;
        }
    }

    async fn collect_categories(
        &self,
        categories: &[&str],
        seen: &mut HashSet<String>,
        listings: &mut Vec<Apprenticeship>,
    ) {
        tracing::info!("Scraping Higher In across {} categories", categories.len());

        for (i, batch) in categories.chunks(CATEGORY_BATCH).enumerate() {
            if i > 0 {
                pause(self.delays.between_batches).await;
            }
            for category in batch {
                self.scrape_category(category, seen, listings).await;
            }
        }
    }

    /// Fetches a single Higher In category page.
    ///
    /// A category is fetched once; a missing page means the category has no listings
    /// and any other failure is logged and the category skipped.
    async fn scrape_category(
        &self,
        category: &str,
        seen: &mut HashSet<String>,
        listings: &mut Vec<Apprenticeship>,
    ) {
        let html = match self.fetcher.fetch(&higherin::category_url(category)).await {
            Ok(html) => html,
            Err(ScrapeError::Status { status: 404, .. }) => {
                tracing::debug!("No Higher In listings for {}", category);
                return;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch Higher In category {}: {}", category, e);
                return;
            }
        };

        match self.higherin.parse_page(&html, category) {
            Ok(found) => {
                for listing in found {
                    if seen.insert(listing.id.clone()) {
                        listings.push(listing);
                    }
                }
            }
            Err(e) => tracing::warn!("Failed to parse Higher In category {}: {}", category, e),
        }
    }

    async fn scrape_route(
        &self,
        route: &Route,
        today: NaiveDate,
        seen: &mut HashSet<String>,
        listings: &mut Vec<Apprenticeship>,
    ) {
        let mut page = 1;
        let mut consecutive_errors = 0;

        loop {
            if page > 1 || consecutive_errors > 0 {
                pause(self.delays.between_pages).await;
            }

            let url = route.page_url(page);
            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    consecutive_errors += 1;
                    tracing::warn!(
                        "Failed to fetch page {} of {} ({}/{}): {}",
                        page,
                        route.name,
                        consecutive_errors,
                        MAX_CONSECUTIVE_ERRORS,
                        e
                    );
                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        tracing::error!(
                            "Abandoning {} after {} consecutive errors",
                            route.name,
                            consecutive_errors
                        );
                        return;
                    }
                    continue;
                }
            };
            consecutive_errors = 0;

            let results = self.parser.parse_page(&html, route.name, today);
            if results.is_empty() {
                tracing::debug!("{} has no listings on page {}", route.name, page);
                return;
            }

            for result in results {
                match result {
                    Ok(listing) => {
                        if seen.insert(listing.id.clone()) {
                            listings.push(listing);
                        }
                    }
                    Err(e) => tracing::warn!(
                        "Skipping listing on page {} of {}: {}",
                        page,
                        route.name,
                        e
                    ),
                }
            }

            page += 1;
        }
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{HashMap, VecDeque},
        sync::Mutex,
    };

    use test_utils::fixture::apprenticeship::{
        higherin_page_with_ids, page_with_ids, EMPTY_PAGE_HTML, LISTING_PAGE_HTML,
    };

    use super::*;
    use crate::server::model::apprenticeship::ApprenticeshipSource;

    /// Serves queued responses per URL; anything unqueued is an empty page.
    #[derive(Default)]
    struct FakeFetcher {
        responses: Mutex<HashMap<String, VecDeque<Result<String, u16>>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn with(self, route: &Route, page: u32, response: Result<String, u16>) -> Self {
            self.with_url(route.page_url(page), response)
        }

        fn with_url(self, url: String, response: Result<String, u16>) -> Self {
            self.responses
                .lock()
                .unwrap()
                .entry(url)
                .or_default()
                .push_back(response);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
            self.calls.lock().unwrap().push(url.to_string());
            let next = self
                .responses
                .lock()
                .unwrap()
                .get_mut(url)
                .and_then(VecDeque::pop_front);

            match next {
                Some(Ok(html)) => Ok(html),
                Some(Err(status)) => Err(ScrapeError::Status {
                    status,
                    url: url.to_string(),
                }),
                None => Ok(EMPTY_PAGE_HTML.to_string()),
            }
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    #[tokio::test]
    async fn walks_pages_until_empty() {
        let route = ROUTES[6];
        let fetcher = FakeFetcher::default()
            .with(&route, 1, Ok(LISTING_PAGE_HTML.to_string()))
            .with(&route, 2, Ok(page_with_ids(&["VAC3"])));
        let scraper = Scraper::new(fetcher, ScrapeDelays::none()).unwrap();

        let listings = scraper.scrape_routes(&[route], today()).await;

        let ids: Vec<_> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["VAC1000123456", "VAC1000654321", "VAC3"]);
        assert_eq!(scraper.fetcher.calls().len(), 3);
    }

    #[tokio::test]
    async fn abandons_route_after_three_consecutive_errors() {
        let failing = ROUTES[0];
        let next = ROUTES[1];
        let fetcher = FakeFetcher::default()
            .with(&failing, 1, Err(500))
            .with(&failing, 1, Err(502))
            .with(&failing, 1, Err(503))
            .with(&next, 1, Ok(page_with_ids(&["VAC9"])));
        let scraper = Scraper::new(fetcher, ScrapeDelays::none()).unwrap();

        let listings = scraper.scrape_routes(&[failing, next], today()).await;

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].category, next.name);
        let calls = scraper.fetcher.calls();
        assert_eq!(calls.iter().filter(|u| **u == failing.page_url(1)).count(), 3);
    }

    #[tokio::test]
    async fn successful_fetch_resets_error_count() {
        let route = ROUTES[2];
        let fetcher = FakeFetcher::default()
            .with(&route, 1, Err(500))
            .with(&route, 1, Err(500))
            .with(&route, 1, Ok(page_with_ids(&["VAC1"])))
            .with(&route, 2, Err(500))
            .with(&route, 2, Err(500))
            .with(&route, 2, Ok(page_with_ids(&["VAC2"])));
        let scraper = Scraper::new(fetcher, ScrapeDelays::none()).unwrap();

        let listings = scraper.scrape_routes(&[route], today()).await;

        assert_eq!(listings.len(), 2);
    }

    #[tokio::test]
    async fn duplicates_keep_first_category() {
        let first = ROUTES[6];
        let second = ROUTES[8];
        let fetcher = FakeFetcher::default()
            .with(&first, 1, Ok(page_with_ids(&["VAC1", "VAC2"])))
            .with(&second, 1, Ok(page_with_ids(&["VAC2", "VAC3"])));
        let scraper = Scraper::new(fetcher, ScrapeDelays::none()).unwrap();

        let listings = scraper.scrape_routes(&[first, second], today()).await;

        let summary: Vec<_> = listings
            .iter()
            .map(|l| (l.id.as_str(), l.category.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("VAC1", first.name),
                ("VAC2", first.name),
                ("VAC3", second.name),
            ]
        );
    }

    #[tokio::test]
    async fn skips_missing_and_failing_categories() {
        let fetcher = FakeFetcher::default()
            .with_url(higherin::category_url("tax"), Err(404))
            .with_url(higherin::category_url("audit"), Err(500))
            .with_url(
                higherin::category_url("banking"),
                Ok(higherin_page_with_ids(&["7001"])),
            );
        let scraper = Scraper::new(fetcher, ScrapeDelays::none()).unwrap();

        let listings = scraper.scrape_categories(&["tax", "audit", "banking"]).await;

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].category, "banking");
        assert_eq!(scraper.fetcher.calls().len(), 3);
    }

    #[tokio::test]
    async fn scrape_all_merges_both_sources() {
        let route = ROUTES[6];
        let fetcher = FakeFetcher::default()
            .with(&route, 1, Ok(page_with_ids(&["VAC1"])))
            .with_url(
                higherin::category_url("computer-science"),
                Ok(higherin_page_with_ids(&["9001", "9002"])),
            )
            .with_url(
                higherin::category_url("cyber-security"),
                Ok(higherin_page_with_ids(&["9002", "9003"])),
            );
        let scraper = Scraper::new(fetcher, ScrapeDelays::none()).unwrap();

        let listings = scraper.scrape_all(today()).await;

        let summary: Vec<_> = listings
            .iter()
            .map(|l| (l.id.as_str(), l.category.as_str(), l.source))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("VAC1", route.name, ApprenticeshipSource::FindAnApprenticeship),
                ("9001", "computer-science", ApprenticeshipSource::HigherIn),
                ("9002", "computer-science", ApprenticeshipSource::HigherIn),
                ("9003", "cyber-security", ApprenticeshipSource::HigherIn),
            ]
        );
        let higherin_calls = scraper
            .fetcher
            .calls()
            .into_iter()
            .filter(|url| url.starts_with(higherin::BASE_URL))
            .count();
        assert_eq!(higherin_calls, higherin_categories().len());
    }

    #[test]
    fn higherin_categories_are_unique() {
        let categories = higherin_categories();
        let unique: HashSet<_> = categories.iter().collect();

        assert_eq!(unique.len(), categories.len());
        assert_eq!(categories[0], "computer-science");
    }
}
