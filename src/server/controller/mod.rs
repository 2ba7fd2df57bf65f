//! HTTP handlers for the web service.

pub mod apprenticeship;
pub mod auth;
