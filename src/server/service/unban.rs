//! Lifts soft bans once their duration has passed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{GuildId, Http, UserId};

use crate::server::{
    data::soft_ban::SoftBanRepository, error::AppError, model::moderation::SoftBanRecord,
};

/// Removes a guild ban.
#[async_trait]
pub trait BanLifter: Send + Sync {
    async fn unban(&self, guild_id: u64, user_id: u64) -> Result<(), serenity::Error>;
}

#[async_trait]
impl BanLifter for Http {
    async fn unban(&self, guild_id: u64, user_id: u64) -> Result<(), serenity::Error> {
        GuildId::new(guild_id)
            .unban(self, UserId::new(user_id))
            .await
    }
}

pub struct SoftBanExpiryService<'a, L: BanLifter + ?Sized> {
    db: &'a DatabaseConnection,
    lifter: &'a L,
}

impl<'a, L: BanLifter + ?Sized> SoftBanExpiryService<'a, L> {
    pub fn new(db: &'a DatabaseConnection, lifter: &'a L) -> Self {
        Self { db, lifter }
    }

    /// Unbans every expired soft ban and deletes its record.
    ///
    /// A ban that cannot be lifted is logged and its record kept, so the next run
    /// tries again.
    ///
    /// # Arguments
    /// - `now` - Time to compare expiry against
    ///
    /// # Returns
    /// - `Ok(count)` - Number of bans lifted
    /// - `Err(AppError::DbErr)` - Loading or deleting records failed
    pub async fn lift_expired(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let repo = SoftBanRepository::new(self.db);
        let expired = repo
            .get_all()
            .await?
            .into_iter()
            .filter(|ban| ban.is_expired(now))
            .collect::<Vec<SoftBanRecord>>();

        let mut lifted = 0;
        for ban in expired {
            if let Err(e) = self.lifter.unban(ban.guild_id, ban.user_id).await {
                tracing::error!(
                    "Failed to lift soft ban {} for user {} in guild {}: {}",
                    ban.id,
                    ban.user_id,
                    ban.guild_id,
                    e
                );
                continue;
            }

            repo.delete(ban.id).await?;
            tracing::info!(
                "Lifted soft ban {} for user {} in guild {}",
                ban.id,
                ban.user_id,
                ban.guild_id
            );
            lifted += 1;
        }

        Ok(lifted)
    }
}
