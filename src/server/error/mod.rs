//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy. `AppError` is the top-level
//! type used by startup, the web service and background jobs; it wraps the
//! domain-specific errors and implements `IntoResponse` for the API endpoints. Bot
//! commands use `CommandError`, which the command router turns into chat replies.

pub mod auth;
pub mod command;
pub mod config;
pub mod event;
pub mod internal;
pub mod scrape;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, command::CommandError, config::ConfigError, event::EventError,
        internal::InternalError, scrape::ScrapeError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur outside of command handlers.
/// Most variants use `#[from]` for automatic conversion with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Fatal at startup; the bot never reaches its event loop.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for custom status code mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// A slash command failed outside of the router, e.g. in a button handler.
    #[error(transparent)]
    CommandErr(#[from] CommandError),

    /// An event subscriber failed.
    #[error(transparent)]
    EventErr(#[from] EventError),

    /// Fetching or parsing a scrape target failed.
    #[error(transparent)]
    ScrapeErr(#[from] ScrapeError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// SQLx error from the session store pool or its migration.
    #[error(transparent)]
    SqlxErr(#[from] tower_sessions_sqlx_store::sqlx::Error),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Failed to bind or serve the web listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Unexpected internal state.
    ///
    /// Logged in full; the client only sees a generic message.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` variant
/// - 404 Not Found - For `NotFound` variant
/// - 500 Internal Server Error - For all other error types
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_errors_map_to_500() {
        let response =
            AppError::DbErr(sea_orm::DbErr::Custom("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn csrf_failure_maps_to_400() {
        let response = AppError::AuthErr(AuthError::CsrfValidationFailed).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_access_token_maps_to_403() {
        let response = AppError::AuthErr(AuthError::InvalidAccessToken).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn user_facing_command_errors_are_classified() {
        assert!(CommandError::MissingOption("user".to_string()).is_user_facing());
        assert!(CommandError::GuildOnly.is_user_facing());
        assert!(!CommandError::Database(sea_orm::DbErr::Custom("x".to_string())).is_user_facing());
    }
}
