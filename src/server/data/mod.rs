//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and the command, event
//! and web layers. Discord ids are stored as strings and parsed back on the way out.

pub mod apprenticeship;
pub mod audit_channel;
pub mod moderation_action;
pub mod oauth_user;
pub mod reload_audit;
pub mod soft_ban;

#[cfg(test)]
mod test;

use sea_orm::DbErr;

/// Error for a row whose stored ids or kind cannot be converted into a domain model.
fn invalid_row(table: &str, id: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(format!("{} row {} holds an invalid value", table, id))
}
