//! Discord OAuth2 login for the web service.

use chrono::{Duration, Utc};
use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::all::User as DiscordUser;
use url::Url;

use crate::server::{
    data::oauth_user::OAuthUserRepository,
    error::{auth::AuthError, AppError},
    model::oauth_user::{OAuthUser, UpsertOAuthUserParam},
    state::OAuth2Client,
};

const DISCORD_USER_URL: &str = "https://discord.com/api/users/@me";

pub struct DiscordAuthService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
        }
    }

    /// Builds the Discord consent URL and the CSRF state to remember for the callback.
    ///
    /// Only the `identify` scope is requested.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .url()
    }

    /// Completes a login.
    ///
    /// Exchanges the authorization code, fetches the Discord profile and stores the user
    /// with their tokens.
    ///
    /// # Arguments
    /// - `authorization_code` - Code from the callback query string
    ///
    /// # Returns
    /// - `Ok(OAuthUser)` - The stored user
    /// - `Err(AuthError::TokenExchange)` - Discord rejected the code
    /// - `Err(AppError::ReqwestErr)` - Fetching the profile failed
    /// - `Err(AppError::DbErr)` - Storing the user failed
    pub async fn callback(&self, authorization_code: String) -> Result<OAuthUser, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(AuthError::from)?;

        let discord_user = self.fetch_discord_user(&token).await?;
        let expires_at = token
            .expires_in()
            .and_then(|expires_in| Duration::from_std(expires_in).ok())
            .map(|expires_in| Utc::now() + expires_in);

        let user = OAuthUserRepository::new(self.db)
            .upsert(UpsertOAuthUserParam::from_discord_user(
                &discord_user,
                token.access_token().secret().clone(),
                token.refresh_token().map(|t| t.secret().clone()),
                expires_at,
            ))
            .await?;

        tracing::info!("User {} ({}) logged in", user.name, user.discord_id);

        Ok(user)
    }

    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordUser, AppError> {
        let user = self
            .http_client
            .get(DISCORD_USER_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await?;

        Ok(user)
    }
}
