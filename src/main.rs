mod model;
mod server;

use std::sync::{atomic::AtomicBool, Arc};

use chrono::Utc;
use serenity::all::Http;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};

use crate::server::{
    bot::{
        self,
        context::{BotContext, ShutdownHandle},
    },
    config::Config,
    error::AppError,
    event::{listener::ModerationAuditListener, moderation::ModerationActionEvent, EventBus},
    scheduler::hourly,
    service::access_token::ListingAccessTokens,
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    match run().await {
        Ok(exit_code) => {
            tracing::info!("Exiting with code {}", exit_code);
            std::process::exit(exit_code);
        }
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Starts the bot, scheduler and web service, then waits for a shutdown request.
///
/// # Returns
/// - `Ok(exit_code)` - Exit code requested by an owner command, or 0 on Ctrl+C
/// - `Err(AppError)` - Startup failed
async fn run() -> Result<i32, AppError> {
    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&config.database_url).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;

    let discord_http = Arc::new(Http::new(&config.discord_bot_token));

    let mut events = EventBus::new();
    events.subscribe::<ModerationActionEvent, _>(ModerationAuditListener::new(
        db.clone(),
        discord_http.clone(),
    ));

    let access_tokens = ListingAccessTokens::new();
    let (shutdown, shutdown_rx) = ShutdownHandle::new();
    let app = BotContext {
        db: db.clone(),
        http: discord_http,
        config: config.clone(),
        events: Arc::new(events),
        shutdown,
        started_at: Utc::now(),
        sync_running: Arc::new(AtomicBool::new(false)),
        access_tokens: access_tokens.clone(),
    };

    tracing::info!("Starting bot");

    let mut client = bot::start::build_client(app.clone()).await?;
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = client.start().await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let mut scheduler = hourly::start_scheduler(app).await?;

    let router = server::router::router()
        .with_state(AppState::new(db, http_client, oauth_client, access_tokens))
        .layer(session)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any));
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Web service listening on {}", config.bind_address);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("Web service error: {}", e);
        }
    });

    let exit_code = wait_for_shutdown(shutdown_rx).await;

    tracing::info!("Shutting down");
    shard_manager.shutdown_all().await;
    if let Err(e) = scheduler.shutdown().await {
        tracing::error!("Failed to stop scheduler: {}", e);
    }

    Ok(exit_code)
}

/// Resolves with the first requested exit code, or 0 on Ctrl+C.
async fn wait_for_shutdown(mut shutdown_rx: watch::Receiver<Option<i32>>) -> i32 {
    tokio::select! {
        requested = shutdown_rx.wait_for(Option::is_some) => {
            requested.ok().and_then(|exit_code| *exit_code).unwrap_or(0)
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
            }
            0
        }
    }
}
