//! Temporary access tokens for the apprenticeship listing endpoint.
//!
//! The `view-apprenticeships` command issues a token and links to the web listing with
//! it. Tokens live in memory for 24 hours and any number of requests may use one
//! before it expires.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tokio::sync::RwLock;

/// Lifetime of an issued token.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

const TOKEN_LENGTH: usize = 32;

/// Shared store of issued tokens and their expiry, cloned into the bot and web state.
#[derive(Clone, Default)]
pub struct ListingAccessTokens {
    tokens: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl ListingAccessTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new random token valid for 24 hours from `now`.
    ///
    /// Expired tokens are dropped while the store is locked.
    ///
    /// # Returns
    /// - `String` - The 32 character alphanumeric token
    pub async fn issue(&self, now: DateTime<Utc>) -> String {
        let token = generate_token();
        let mut tokens = self.tokens.write().await;

        tokens.retain(|_, expires_at| *expires_at > now);
        tokens.insert(token.clone(), now + Duration::hours(ACCESS_TOKEN_TTL_HOURS));

        tracing::debug!("Issued apprenticeship access token, {} active", tokens.len());
        token
    }

    /// Whether `token` was issued and has not expired by `now`.
    ///
    /// An expired token is removed on lookup.
    pub async fn is_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        let expires_at = match self.tokens.read().await.get(token) {
            Some(expires_at) => *expires_at,
            None => return false,
        };

        if expires_at > now {
            return true;
        }

        self.tokens.write().await.remove(token);
        false
    }
}

fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
