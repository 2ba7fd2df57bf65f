//! Moderation action repository.
//!
//! Stores warns, kicks, bans, timeouts and message purges so the audit commands can page
//! through a user's history and the audit listener can reference the action id.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::invalid_row,
    model::moderation::{CreateModerationParam, ModerationKind, ModerationRecord},
};

pub struct ModerationActionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModerationActionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a moderation action.
    ///
    /// # Arguments
    /// - `param` - Kind, guild, subject, actor, reason and optional timeout end
    ///
    /// # Returns
    /// - `Ok(ModerationRecord)` - The stored record with its assigned id
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateModerationParam) -> Result<ModerationRecord, DbErr> {
        let entity = entity::moderation_action::ActiveModel {
            kind: ActiveValue::Set(param.kind.name().to_string()),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            actor_id: ActiveValue::Set(param.actor_id.to_string()),
            reason: ActiveValue::Set(param.reason),
            timeout_until: ActiveValue::Set(param.timeout_until),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let id = entity.id;
        ModerationRecord::from_entity(entity).ok_or_else(|| invalid_row("moderation_action", id))
    }

    /// Finds a single action by id.
    ///
    /// # Returns
    /// - `Ok(Some(ModerationRecord))` - The action exists
    /// - `Ok(None)` - No action with that id
    /// - `Err(DbErr)` - Database error, or the stored row is malformed
    pub async fn find_by_id(&self, id: i32) -> Result<Option<ModerationRecord>, DbErr> {
        let Some(entity) = entity::prelude::ModerationAction::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        ModerationRecord::from_entity(entity)
            .map(Some)
            .ok_or_else(|| invalid_row("moderation_action", id))
    }

    /// Gets every action of `kind` taken against a user in a guild, newest first.
    ///
    /// Rows that cannot be converted are skipped and logged.
    pub async fn get_by_user(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: ModerationKind,
    ) -> Result<Vec<ModerationRecord>, DbErr> {
        let entities = entity::prelude::ModerationAction::find()
            .filter(entity::moderation_action::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::moderation_action::Column::UserId.eq(user_id.to_string()))
            .filter(entity::moderation_action::Column::Kind.eq(kind.name()))
            .order_by_desc(entity::moderation_action::Column::CreatedAt)
            .order_by_desc(entity::moderation_action::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .filter_map(|entity| {
                let id = entity.id;
                let record = ModerationRecord::from_entity(entity);
                if record.is_none() {
                    tracing::warn!("Skipping malformed moderation_action row {}", id);
                }
                record
            })
            .collect())
    }

    /// Counts the actions of `kind` taken against a user in a guild.
    pub async fn count_by_user(
        &self,
        guild_id: u64,
        user_id: u64,
        kind: ModerationKind,
    ) -> Result<u64, DbErr> {
        entity::prelude::ModerationAction::find()
            .filter(entity::moderation_action::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::moderation_action::Column::UserId.eq(user_id.to_string()))
            .filter(entity::moderation_action::Column::Kind.eq(kind.name()))
            .count(self.db)
            .await
    }
}
