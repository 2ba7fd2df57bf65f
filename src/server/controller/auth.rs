use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::server::{
    error::AppError,
    middleware::{
        auth::AuthGuard,
        session::{AuthSession, CsrfSession},
    },
    service::auth::DiscordAuthService,
    state::AppState,
};

/// Query parameters Discord appends to the OAuth callback.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state that must match the value stored in the session.
    pub state: String,
    /// Authorization code to exchange for tokens.
    pub code: String,
}

/// GET /api/auth/login - Redirect to the Discord consent screen
///
/// Stores the CSRF state in the session for the callback to check.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client);

    let (url, csrf_token) = auth_service.login_url();
    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// GET /api/auth/callback - Complete a Discord login
///
/// # Returns
/// - `200 OK`: JSON UserDto of the logged in user
/// - `400 Bad Request`: CSRF state mismatch or the code was rejected
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    CsrfSession::new(&session).validate(&params.state).await?;

    let auth_service = DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client);
    let user = auth_service.callback(params.code).await?;

    AuthSession::new(&session).set_user_id(user.discord_id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// GET /api/auth/user - The logged in user
///
/// # Returns
/// - `200 OK`: JSON UserDto
/// - `401 Unauthorized`: Not logged in
/// - `404 Not Found`: The session user no longer exists
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// GET /api/auth/logout - Clear the session
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(StatusCode::OK)
}
