//! Commands anyone can use.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;

use crate::server::{
    bot::{
        command::{options::InteractionContext, CommandDescriptor, SlashCommand},
        context::BotContext,
        reply::{EmbedSpec, Reply, ReplySink, BOT_COLOUR},
    },
    error::command::CommandError,
    service::access_token::ACCESS_TOKEN_TTL_HOURS,
    util::time::format_uptime,
};

pub struct PingCommand;

#[async_trait]
impl SlashCommand for PingCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("ping", "Get the bots REST latency")
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let started = Instant::now();
        let latency = match app.http.get_current_user().await {
            Ok(_) => Some(started.elapsed()),
            Err(e) => {
                tracing::warn!("Failed to measure REST latency: {}", e);
                None
            }
        };

        reply
            .send(Reply::embed(ping_embed(latency, &ctx.user_name)))
            .await
    }
}

fn ping_embed(rest_latency: Option<Duration>, user_name: &str) -> EmbedSpec {
    let latency = rest_latency
        .map(|latency| format!("{}ms", latency.as_millis()))
        .unwrap_or_else(|| "unavailable".to_string());

    EmbedSpec::new()
        .title("Pong!")
        .field("REST latency", latency, true)
        .footer(format!("Requested by {}", user_name))
        .colour(BOT_COLOUR)
}

pub struct UptimeCommand;

#[async_trait]
impl SlashCommand for UptimeCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("uptime", "Get the bots uptime")
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let uptime = format_uptime(Utc::now() - app.started_at);

        let embed = EmbedSpec::new()
            .title("Uptime")
            .description(format!("The bot has been up for {}", uptime))
            .footer(format!("Requested by {}", ctx.user_name))
            .colour(BOT_COLOUR);

        reply.send(Reply::embed(embed)).await
    }
}

pub struct ViewApprenticeshipsCommand;

#[async_trait]
impl SlashCommand for ViewApprenticeshipsCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new(
            "view-apprenticeships",
            "Get a private link to the open apprenticeship listings",
        )
    }

    async fn execute(
        &self,
        app: &BotContext,
        _ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let token = app.access_tokens.issue(Utc::now()).await;
        let url = listing_url(&app.config.web_base_url, &token);

        reply
            .send(Reply::embed(listing_link_embed(&url)).ephemeral())
            .await
    }
}

fn listing_url(web_base_url: &str, token: &str) -> String {
    format!("{}/api/apprenticeships?token={}", web_base_url, token)
}

fn listing_link_embed(url: &str) -> EmbedSpec {
    EmbedSpec::new()
        .title("🎓 View Available Apprenticeships")
        .description("Use the link below to browse every apprenticeship that is still open.")
        .field("🔗 Access Link", format!("[Open listings]({})", url), false)
        .field(
            "⏰ Link Expires",
            format!("This link will expire in {} hours", ACCESS_TOKEN_TTL_HOURS),
            false,
        )
        .footer("This link is private and only visible to you")
        .colour(BOT_COLOUR)
}
