//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs or embeds at the controller and bot boundaries.

pub mod apprenticeship;
pub mod category_group;
pub mod moderation;
pub mod oauth_user;
