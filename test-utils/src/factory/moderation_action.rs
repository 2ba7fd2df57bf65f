//! Moderation action factory for warn, kick, ban, timeout and purge records.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating moderation action records.
///
/// # Example
///
/// ```rust,ignore
/// let timeout = ModerationActionFactory::new(&db)
///     .kind("timeout")
///     .timeout_until(Some(Utc::now() + Duration::hours(1)))
///     .build()
///     .await?;
/// ```
pub struct ModerationActionFactory<'a> {
    db: &'a DatabaseConnection,
    kind: String,
    guild_id: String,
    user_id: String,
    actor_id: String,
    reason: String,
    timeout_until: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl<'a> ModerationActionFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - kind: `"warn"`
    /// - guild_id: `"guild_{id}"`
    /// - user_id: `"{id}"`
    /// - actor_id: `"1"`
    /// - reason: `"Reason {id}"`
    /// - timeout_until: `None`
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            kind: "warn".to_string(),
            guild_id: format!("guild_{}", id),
            user_id: id.to_string(),
            actor_id: "1".to_string(),
            reason: format!("Reason {}", id),
            timeout_until: None,
            created_at: Utc::now(),
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = actor_id.into();
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn timeout_until(mut self, timeout_until: Option<DateTime<Utc>>) -> Self {
        self.timeout_until = timeout_until;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the moderation action.
    ///
    /// # Returns
    /// - `Ok(entity::moderation_action::Model)` - Created record with its assigned id
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::moderation_action::Model, DbErr> {
        entity::moderation_action::ActiveModel {
            kind: ActiveValue::Set(self.kind),
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            actor_id: ActiveValue::Set(self.actor_id),
            reason: ActiveValue::Set(self.reason),
            timeout_until: ActiveValue::Set(self.timeout_until),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a moderation action of the given kind with default values.
pub async fn create_moderation_action(
    db: &DatabaseConnection,
    kind: &str,
) -> Result<entity::moderation_action::Model, DbErr> {
    ModerationActionFactory::new(db).kind(kind).build().await
}
