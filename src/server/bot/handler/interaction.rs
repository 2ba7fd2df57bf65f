//! Slash command interactions.

use serenity::all::CommandInteraction;

use crate::server::bot::{
    command::{options::InteractionContext, router::CommandRouter},
    context::BotContext,
    reply::{InteractionResponder, InteractionTarget},
};

/// Converts a command interaction and routes it to its handler.
pub async fn handle_command(
    app: &BotContext,
    router: &CommandRouter,
    interaction: CommandInteraction,
) {
    let ctx = InteractionContext::from_interaction(&interaction);
    tracing::debug!(
        "Command {} used by {} in guild {:?}",
        ctx.command,
        ctx.user_id,
        ctx.guild_id
    );

    let responder =
        InteractionResponder::new(app.http.clone(), InteractionTarget::Command(interaction));
    router.route(app, &ctx, &responder).await;
}
