use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

use crate::server::{
    bot::{
        command::{catalog::build_registry, router::CommandRouter},
        context::BotContext,
        handler::Handler,
    },
    error::AppError,
};

/// Builds the Discord client with the command router attached.
///
/// The client is returned unstarted so the caller can keep its shard manager for
/// shutdown before handing it to `client.start()` on a spawned task.
///
/// # Arguments
/// - `app` - Shared bot context; its config supplies the token and owner id
///
/// # Returns
/// - `Ok(Client)` - Client ready to start
/// - `Err(AppError::DiscordErr)` - The client could not be built
pub async fn build_client(app: BotContext) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS;

    let router = Arc::new(CommandRouter::new(build_registry(), app.config.owner_id));
    let token = app.config.discord_bot_token.clone();
    let handler = Handler::new(app, router);

    let client = Client::builder(&token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}
