//! Users who have logged in to the web service through Discord OAuth.

use chrono::{DateTime, Utc};

use crate::model::user::UserDto;

#[derive(Debug, Clone, PartialEq)]
pub struct OAuthUser {
    pub discord_id: u64,
    pub name: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl OAuthUser {
    /// Converts an entity model, returning `None` when the stored id is not numeric.
    ///
    /// Tokens stay in the data layer and are never copied into the domain model.
    pub fn from_entity(entity: entity::oauth_user::Model) -> Option<Self> {
        Some(Self {
            discord_id: entity.discord_id.parse().ok()?,
            name: entity.name,
            expires_at: entity.expires_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            discord_id: self.discord_id.to_string(),
            name: self.name,
        }
    }
}

/// Parameters for storing the result of an OAuth login.
#[derive(Debug, Clone)]
pub struct UpsertOAuthUserParam {
    pub discord_id: u64,
    pub name: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UpsertOAuthUserParam {
    /// Builds the upsert parameters from the Discord user and the token response values.
    pub fn from_discord_user(
        user: &serenity::all::User,
        access_token: String,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            discord_id: user.id.get(),
            name: user.name.clone(),
            access_token,
            refresh_token,
            expires_at,
        }
    }
}
