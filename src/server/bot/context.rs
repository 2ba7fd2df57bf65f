//! Shared state handed to every command and background job.

use std::sync::{atomic::AtomicBool, Arc};

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::Http;
use tokio::sync::watch;

use crate::server::{
    config::Config, event::EventBus, service::access_token::ListingAccessTokens,
};

/// Exit code for an owner-requested shutdown.
pub const SHUTDOWN_EXIT_CODE: i32 = 4000;

/// Exit code asking the process supervisor to restart the bot.
pub const RELOAD_EXIT_CODE: i32 = 4004;

/// Requests process teardown with an exit code.
///
/// The first request wins; later requests are ignored.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<Option<i32>>>,
}

impl ShutdownHandle {
    pub fn new() -> (Self, watch::Receiver<Option<i32>>) {
        let (tx, rx) = watch::channel(None);
        (Self { tx: Arc::new(tx) }, rx)
    }

    pub fn request(&self, exit_code: i32) {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(exit_code);
            true
        });
    }

    /// Exit code requested so far, if any.
    pub fn requested(&self) -> Option<i32> {
        *self.tx.borrow()
    }
}

/// Application context for the bot.
#[derive(Clone)]
pub struct BotContext {
    pub db: DatabaseConnection,
    pub http: Arc<Http>,
    pub config: Arc<Config>,
    pub events: Arc<EventBus>,
    pub shutdown: ShutdownHandle,
    pub started_at: DateTime<Utc>,
    /// Set while an apprenticeship sync is running.
    pub sync_running: Arc<AtomicBool>,
    /// Shared with the web state so issued links are accepted there.
    pub access_tokens: ListingAccessTokens,
}

#[cfg(test)]
impl BotContext {
    /// Context backed by `db` with an unauthenticated HTTP client and owner id 42.
    pub fn for_test(db: DatabaseConnection) -> (Self, watch::Receiver<Option<i32>>) {
        let config = Config::from_lookup(|name| {
            let value = match name {
                "DISCORD_BOT_TOKEN" => "token",
                "OWNER_ID" => "42",
                "DATABASE_URL" => "sqlite::memory:",
                "DISCORD_CLIENT_ID" => "client",
                "DISCORD_CLIENT_SECRET" => "secret",
                "DISCORD_REDIRECT_URL" => "http://localhost:8080/api/auth/callback",
                _ => return None,
            };
            Some(value.to_string())
        })
        .unwrap();
        let (shutdown, rx) = ShutdownHandle::new();

        (
            Self {
                db,
                http: Arc::new(Http::new("")),
                config: Arc::new(config),
                events: Arc::new(EventBus::new()),
                shutdown,
                started_at: Utc::now(),
                sync_running: Arc::new(AtomicBool::new(false)),
                access_tokens: ListingAccessTokens::new(),
            },
            rx,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_shutdown_request_wins() {
        let (handle, rx) = ShutdownHandle::new();

        handle.request(RELOAD_EXIT_CODE);
        handle.request(SHUTDOWN_EXIT_CODE);

        assert_eq!(*rx.borrow(), Some(RELOAD_EXIT_CODE));
        assert_eq!(handle.requested(), Some(RELOAD_EXIT_CODE));
    }
}
