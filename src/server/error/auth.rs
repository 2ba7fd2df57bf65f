use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use oauth2::{
    basic::BasicErrorResponseType, HttpClientError, RequestTokenError, StandardErrorResponse,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session. Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// No user id is stored in the session.
    #[error("User is not logged in")]
    UserNotInSession,

    /// The session refers to a user that no longer exists in the database.
    #[error("User {0} from session was not found in the database")]
    UserNotInDatabase(u64),

    /// The listing access token was never issued or has expired.
    #[error("Invalid or expired access token")]
    InvalidAccessToken,

    /// Exchanging the authorization code for a token failed.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(
        #[from]
        RequestTokenError<
            HttpClientError<reqwest::Error>,
            StandardErrorResponse<BasicErrorResponseType>,
        >,
    ),
}

/// Converts authentication errors into HTTP responses.
///
/// - `CsrfValidationFailed` / `TokenExchange` → 400 Bad Request
/// - `UserNotInSession` → 401 Unauthorized
/// - `InvalidAccessToken` → 403 Forbidden
/// - `UserNotInDatabase` → 404 Not Found
///
/// Details are logged at debug level while client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::CsrfValidationFailed | Self::TokenExchange(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "There was an issue logging you in, please try again.".to_string(),
                }),
            )
                .into_response(),
            Self::UserNotInSession => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "You are not logged in".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidAccessToken => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Invalid or expired token".to_string(),
                }),
            )
                .into_response(),
            Self::UserNotInDatabase(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: "User not found".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
