//! Audit channel repository.
//!
//! Each guild has at most one channel that receives moderation audit embeds.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

pub struct AuditChannelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditChannelRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the audit channel configured for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(channel_id))` - The guild has an audit channel
    /// - `Ok(None)` - No audit channel set, or the stored id is not a valid Discord id
    /// - `Err(DbErr)` - Database error during query
    pub async fn get(&self, guild_id: u64) -> Result<Option<u64>, DbErr> {
        let entity = entity::prelude::AuditChannel::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity
            .and_then(|e| e.channel_id.parse::<u64>().ok())
            .filter(|id| *id != 0))
    }

    /// Stores the audit channel for a guild only if none is set yet.
    ///
    /// # Returns
    /// - `Ok(true)` - The channel was stored
    /// - `Ok(false)` - The guild already had an audit channel, nothing changed
    pub async fn set_if_absent(&self, guild_id: u64, channel_id: u64) -> Result<bool, DbErr> {
        let existing = entity::prelude::AuditChannel::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        entity::audit_channel::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            channel_id: ActiveValue::Set(channel_id.to_string()),
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Sets the audit channel for a guild, replacing any previous channel.
    pub async fn upsert(&self, guild_id: u64, channel_id: u64) -> Result<(), DbErr> {
        let existing = entity::prelude::AuditChannel::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        let active = entity::audit_channel::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            channel_id: ActiveValue::Set(channel_id.to_string()),
        };

        if existing.is_some() {
            active.update(self.db).await?;
        } else {
            active.insert(self.db).await?;
        }

        Ok(())
    }
}
