//! Gateway event handlers.

use std::sync::Arc;

use serenity::all::{Context, EventHandler, Interaction, Ready};
use serenity::async_trait;

use crate::server::bot::{command::router::CommandRouter, context::BotContext};

pub mod component;
pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub app: BotContext,
    pub router: Arc<CommandRouter>,
}

impl Handler {
    pub fn new(app: BotContext, router: Arc<CommandRouter>) -> Self {
        Self { app, router }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.router, ctx, ready).await;
    }

    /// Called for slash commands and button presses
    async fn interaction_create(&self, _ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                interaction::handle_command(&self.app, &self.router, command).await
            }
            Interaction::Component(component) => {
                component::handle_component(&self.app, component).await
            }
            _ => {}
        }
    }
}
