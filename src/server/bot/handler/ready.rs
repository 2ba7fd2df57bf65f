//! Ready event handler.
//!
//! Fired once per gateway connection. Registers the slash commands with Discord and
//! prunes commands left over from earlier versions of the bot.

use serenity::all::{ActivityData, Context, Ready};

use crate::server::bot::command::router::CommandRouter;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `router` - Router whose registry is synced to Discord
/// - `ctx` - Discord context for setting activity status and registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(router: &CommandRouter, ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord in {} guilds",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::watching("over the server")));

    if let Err(e) = router.sync(&ctx.http).await {
        tracing::error!("Failed to sync slash commands: {}", e);
    }
}
