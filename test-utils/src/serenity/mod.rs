//! Test factories for creating Serenity API objects.
//!
//! Objects are built by deserializing JSON shaped like Discord's API responses, so the
//! resulting structs are exactly what Serenity would produce at runtime.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_user;
//!
//! let user = create_test_user(123456789, "moderator");
//! assert_eq!(user.name, "moderator");
//! ```

pub mod user;

pub use user::create_test_user;
