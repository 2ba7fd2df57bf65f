//! Type-safe session wrappers.
//!
//! Each wrapper exposes only the session keys belonging to one concern:
//! - `AuthSession` - Discord id of the logged in user
//! - `CsrfSession` - CSRF state of an OAuth login in progress

use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    util::parse::parse_u64_from_string,
};

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the user's Discord id after a successful login.
    ///
    /// # Returns
    /// - `Ok(())` - User id stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user_id(&self, user_id: u64) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_USER_ID, user_id.to_string())
            .await?;
        Ok(())
    }

    /// Retrieves the logged in user's Discord id.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is logged in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    /// - `Err(AppError::InternalErr(_))` - Stored id is not numeric
    pub async fn get_user_id(&self) -> Result<Option<u64>, AppError> {
        let Some(user_id) = self.session.get::<String>(SESSION_AUTH_USER_ID).await? else {
            return Ok(None);
        };

        Ok(Some(parse_u64_from_string(user_id)?))
    }

    /// Removes everything from the session.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF state for the OAuth login flow.
///
/// The token is stored when the login redirect is issued and consumed by the callback,
/// so each token validates at most once.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Removes and returns the stored token.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }

    /// Consumes the stored token and compares it with the callback state.
    ///
    /// # Returns
    /// - `Ok(())` - A token was stored and it matches `state`
    /// - `Err(AuthError::CsrfValidationFailed)` - No token was stored or it differs
    pub async fn validate(&self, state: &str) -> Result<(), AppError> {
        match self.take_token().await? {
            Some(token) if token == state => Ok(()),
            _ => Err(AuthError::CsrfValidationFailed.into()),
        }
    }
}
