//! SeaORM entity models for the MystiGuardian database.

pub mod prelude;

pub mod apprenticeship;
pub mod audit_channel;
pub mod moderation_action;
pub mod oauth_user;
pub mod reload_audit;
pub mod soft_ban;
