//! OAuth user repository.
//!
//! Holds the Discord profile and tokens of everyone who has logged in to the web service.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::server::{
    data::invalid_row,
    model::oauth_user::{OAuthUser, UpsertOAuthUserParam},
};

pub struct OAuthUserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OAuthUserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or refreshes a user after a successful OAuth callback.
    ///
    /// Name and tokens are overwritten on every login.
    ///
    /// # Arguments
    /// - `param` - Discord id, name and token response values
    ///
    /// # Returns
    /// - `Ok(OAuthUser)` - The stored user
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(&self, param: UpsertOAuthUserParam) -> Result<OAuthUser, DbErr> {
        let discord_id = param.discord_id.to_string();
        let existing = entity::prelude::OauthUser::find_by_id(discord_id.clone())
            .one(self.db)
            .await?;

        let active = entity::oauth_user::ActiveModel {
            discord_id: ActiveValue::Set(discord_id.clone()),
            name: ActiveValue::Set(param.name),
            access_token: ActiveValue::Set(param.access_token),
            refresh_token: ActiveValue::Set(param.refresh_token),
            expires_at: ActiveValue::Set(param.expires_at),
            updated_at: ActiveValue::Set(Utc::now()),
        };

        let entity = if existing.is_some() {
            active.update(self.db).await?
        } else {
            active.insert(self.db).await?
        };

        OAuthUser::from_entity(entity).ok_or_else(|| invalid_row("oauth_user", discord_id))
    }

    /// Finds a user by Discord id.
    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<OAuthUser>, DbErr> {
        let entity = entity::prelude::OauthUser::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.and_then(OAuthUser::from_entity))
    }
}
