//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` convenience
//! function for quick default creation. Factories insert into the database; use
//! `fixture` for in-memory models.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let warn = factory::create_moderation_action(&db, "warn").await?;
//! let channel = factory::create_audit_channel(&db, "123", "456").await?;
//!
//! let ban = factory::moderation_action::ModerationActionFactory::new(&db)
//!     .kind("ban")
//!     .guild_id("123")
//!     .user_id("789")
//!     .reason("Spamming")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `moderation_action` - Warn, kick, ban, timeout and purge records
//! - `soft_ban` - Soft ban records
//! - `reload_audit` - Reload audit records
//! - `audit_channel` - Per-guild audit channel settings
//! - `apprenticeship` - Stored apprenticeship listings
//! - `oauth_user` - Users logged in to the web service
//! - `helpers` - Shared id generation

pub mod apprenticeship;
pub mod audit_channel;
pub mod helpers;
pub mod moderation_action;
pub mod oauth_user;
pub mod reload_audit;
pub mod soft_ban;

pub use apprenticeship::create_apprenticeship;
pub use audit_channel::create_audit_channel;
pub use moderation_action::create_moderation_action;
pub use oauth_user::create_oauth_user;
pub use reload_audit::create_reload_audit;
pub use soft_ban::create_soft_ban;
