//! MystiGuardian Test Utils
//!
//! Shared testing utilities for the MystiGuardian bot. The crate provides a builder for
//! test contexts backed by an in-memory SQLite database, factories that insert entities
//! with sensible defaults, in-memory fixtures, and Serenity object factories.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection and session
//! - **TestError**: Errors that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::ModerationAction;
//!
//! #[tokio::test]
//! async fn records_warn() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(ModerationAction)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
pub mod serenity;
