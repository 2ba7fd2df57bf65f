//! Data transfer objects returned by the web API.

pub mod api;
pub mod apprenticeship;
pub mod user;
