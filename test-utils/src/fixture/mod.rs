//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures never touch the database. They supply canned HTML pages
//! for the scraper and in-memory entity models for conversion tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let html = fixture::apprenticeship::LISTING_PAGE_HTML;
//! let page = fixture::apprenticeship::page_with_ids(&["VAC1", "VAC2"]);
//! let model = fixture::apprenticeship::entity();
//! ```

pub mod apprenticeship;
