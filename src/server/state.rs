//! Application state shared across all request handlers.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use crate::server::service::access_token::ListingAccessTokens;

/// OAuth2 client configured for Discord, with auth and token endpoints set.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Shared resources for the web endpoints.
///
/// Every field is cheap to clone: the database connection is a pool and the clients
/// share their internals.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Used for the token exchange and Discord profile requests. Does not follow redirects.
    pub http_client: reqwest::Client,
    pub oauth_client: OAuth2Client,
    /// Tokens issued by the `view-apprenticeships` command.
    pub access_tokens: ListingAccessTokens,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        access_tokens: ListingAccessTokens,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            access_tokens,
        }
    }
}
