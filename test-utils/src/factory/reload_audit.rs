//! Reload audit factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a reload audit entry for the given user.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord id of the owner who reloaded the bot
/// - `reason` - Reason given for the reload
pub async fn create_reload_audit(
    db: &DatabaseConnection,
    user_id: &str,
    reason: &str,
) -> Result<entity::reload_audit::Model, DbErr> {
    entity::reload_audit::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        reason: ActiveValue::Set(reason.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
