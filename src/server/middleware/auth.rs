use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::oauth_user::OAuthUserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::oauth_user::OAuthUser,
};

/// Resolves the logged in user for endpoints that require a login.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Returns the user stored in the session.
    ///
    /// # Returns
    /// - `Ok(OAuthUser)` - The session holds a user that exists in the database
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::UserNotInDatabase)` - The session refers to an unknown user
    pub async fn require(&self) -> Result<OAuthUser, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = OAuthUserRepository::new(self.db)
            .find_by_discord_id(user_id)
            .await?
        else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        Ok(user)
    }
}
