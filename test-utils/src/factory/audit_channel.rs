//! Audit channel factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Stores `channel_id` as the audit channel of `guild_id`.
pub async fn create_audit_channel(
    db: &DatabaseConnection,
    guild_id: &str,
    channel_id: &str,
) -> Result<entity::audit_channel::Model, DbErr> {
    entity::audit_channel::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        channel_id: ActiveValue::Set(channel_id.to_string()),
    }
    .insert(db)
    .await
}
