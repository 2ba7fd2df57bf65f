use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::apprenticeship::ApprenticeshipDto,
    server::{
        data::apprenticeship::ApprenticeshipRepository,
        error::{auth::AuthError, AppError},
        middleware::auth::AuthGuard,
        state::AppState,
    },
};

#[derive(Deserialize)]
pub struct ListingParams {
    /// Token from a `view-apprenticeships` link.
    pub token: Option<String>,
}

/// GET /api/apprenticeships - Listings still open for applications
///
/// Requires either a token issued by the `view-apprenticeships` command or a logged in
/// session. Listings closing today or later come first, soonest first, followed by
/// listings without a known closing date.
///
/// # Returns
/// - `200 OK`: JSON array of ApprenticeshipDto
/// - `401 Unauthorized`: No token and not logged in
/// - `403 Forbidden`: The token is unknown or expired
/// - `500 Internal Server Error`: Database error
pub async fn get_open_apprenticeships(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListingParams>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();

    match params.token.as_deref() {
        Some(token) => {
            if !state.access_tokens.is_valid(token, now).await {
                return Err(AuthError::InvalidAccessToken.into());
            }
        }
        None => {
            AuthGuard::new(&state.db, &session).require().await?;
        }
    }

    let listings = ApprenticeshipRepository::new(&state.db)
        .get_active(now.date_naive())
        .await?
        .into_iter()
        .map(|listing| listing.into_dto())
        .collect::<Vec<ApprenticeshipDto>>();

    Ok((StatusCode::OK, Json(listings)))
}
