//! Soft ban factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating soft ban records.
///
/// Use `created_at` to place a ban in the past when testing expiry.
pub struct SoftBanFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    actor_id: String,
    reason: String,
    days: i32,
    created_at: DateTime<Utc>,
}

impl<'a> SoftBanFactory<'a> {
    /// Creates a new factory with a one day ban issued now.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: format!("guild_{}", id),
            user_id: id.to_string(),
            actor_id: "1".to_string(),
            reason: format!("Soft ban {}", id),
            days: 1,
            created_at: Utc::now(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn days(mut self, days: i32) -> Self {
        self.days = days;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the soft ban.
    pub async fn build(self) -> Result<entity::soft_ban::Model, DbErr> {
        entity::soft_ban::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            actor_id: ActiveValue::Set(self.actor_id),
            reason: ActiveValue::Set(self.reason),
            days: ActiveValue::Set(self.days),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a one day soft ban with default values.
pub async fn create_soft_ban(db: &DatabaseConnection) -> Result<entity::soft_ban::Model, DbErr> {
    SoftBanFactory::new(db).build().await
}
