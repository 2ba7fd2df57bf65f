use crate::server::{
    data::oauth_user::OAuthUserRepository, error::AppError,
    model::oauth_user::UpsertOAuthUserParam,
};
use test_utils::builder::TestBuilder;

mod find_by_discord_id;
mod upsert;

fn param(discord_id: u64, name: &str, access_token: &str) -> UpsertOAuthUserParam {
    UpsertOAuthUserParam {
        discord_id,
        name: name.to_string(),
        access_token: access_token.to_string(),
        refresh_token: Some("refresh".to_string()),
        expires_at: None,
    }
}
