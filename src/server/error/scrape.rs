use thiserror::Error;

/// Failures while fetching or parsing a scrape target.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The HTTP request itself failed.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Unexpected status {status} fetching {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// A single listing was missing a required element.
    #[error("Listing is missing {0}")]
    MissingElement(&'static str),

    /// Embedded search results were not valid JSON.
    #[error(transparent)]
    InvalidJson(#[from] serde_json::Error),

    /// A built-in CSS selector failed to compile.
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        selector: &'static str,
        reason: String,
    },

    /// A built-in date pattern failed to compile.
    #[error(transparent)]
    InvalidPattern(#[from] regex::Error),
}
