//! Service layer between the command, web and scheduler entry points and the repositories.
//!
//! Services hold borrowed handles (database, Discord HTTP client, configuration) for the
//! duration of one operation and work with domain models rather than entities or DTOs.

pub mod access_token;
pub mod apprenticeship;
pub mod audit;
pub mod auth;
pub mod moderation;
pub mod unban;
