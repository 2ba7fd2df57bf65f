//! OAuth user factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Stores a logged in user with placeholder tokens.
pub async fn create_oauth_user(
    db: &DatabaseConnection,
    discord_id: &str,
    name: &str,
) -> Result<entity::oauth_user::Model, DbErr> {
    entity::oauth_user::ActiveModel {
        discord_id: ActiveValue::Set(discord_id.to_string()),
        name: ActiveValue::Set(name.to_string()),
        access_token: ActiveValue::Set(format!("access_{}", discord_id)),
        refresh_token: ActiveValue::Set(None),
        expires_at: ActiveValue::Set(None),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
