//! Soft ban repository.
//!
//! A soft ban row lives until the expiry job lifts the ban and deletes it.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    data::invalid_row,
    model::moderation::{CreateSoftBanParam, SoftBanRecord},
};

pub struct SoftBanRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SoftBanRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a soft ban issued now.
    ///
    /// # Returns
    /// - `Ok(SoftBanRecord)` - The stored ban
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateSoftBanParam) -> Result<SoftBanRecord, DbErr> {
        let entity = entity::soft_ban::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            actor_id: ActiveValue::Set(param.actor_id.to_string()),
            reason: ActiveValue::Set(param.reason),
            days: ActiveValue::Set(param.days),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let id = entity.id;
        SoftBanRecord::from_entity(entity).ok_or_else(|| invalid_row("soft_ban", id))
    }

    /// Gets the soft bans of a user in a guild, newest first.
    pub async fn get_by_user(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Vec<SoftBanRecord>, DbErr> {
        let entities = entity::prelude::SoftBan::find()
            .filter(entity::soft_ban::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::soft_ban::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(entity::soft_ban::Column::CreatedAt)
            .order_by_desc(entity::soft_ban::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .filter_map(SoftBanRecord::from_entity)
            .collect())
    }

    /// Gets every outstanding soft ban across all guilds.
    ///
    /// Used by the hourly expiry job.
    pub async fn get_all(&self) -> Result<Vec<SoftBanRecord>, DbErr> {
        let entities = entity::prelude::SoftBan::find()
            .order_by_asc(entity::soft_ban::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .filter_map(|entity| {
                let id = entity.id;
                let record = SoftBanRecord::from_entity(entity);
                if record.is_none() {
                    tracing::warn!("Skipping malformed soft_ban row {}", id);
                }
                record
            })
            .collect())
    }

    /// Deletes a soft ban once it has been lifted.
    ///
    /// # Returns
    /// - `Ok(true)` - The row was deleted
    /// - `Ok(false)` - No row with that id
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::SoftBan::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
