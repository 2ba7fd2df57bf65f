//! Owner-only lifecycle commands.

use std::sync::atomic::Ordering;

use async_trait::async_trait;

use crate::server::{
    bot::{
        command::{
            options::InteractionContext, CommandDescriptor, OptionDescriptor, OptionKind,
            SlashCommand,
        },
        context::{BotContext, RELOAD_EXIT_CODE, SHUTDOWN_EXIT_CODE},
        reply::{Reply, ReplySink},
    },
    data::reload_audit::ReloadAuditRepository,
    error::command::CommandError,
    service::apprenticeship::sync_if_idle,
};

pub struct ShutdownCommand;

#[async_trait]
impl SlashCommand for ShutdownCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("shutdown", "Shuts down the bot").owner_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        reply.send(Reply::text("Shutting down").ephemeral()).await?;

        tracing::info!("Shutdown requested by {}", ctx.user_id);
        app.shutdown.request(SHUTDOWN_EXIT_CODE);

        Ok(())
    }
}

pub struct ReloadCommand;

#[async_trait]
impl SlashCommand for ReloadCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("reload", "Reloads the bot")
            .option(
                OptionDescriptor::new(OptionKind::String, "reason", "The reason for reloading")
                    .required(),
            )
            .owner_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let reason = ctx.string("reason")?;

        ReloadAuditRepository::new(&app.db)
            .create(ctx.user_id, reason)
            .await?;

        reply.send(Reply::text("Reloading the bot").ephemeral()).await?;

        tracing::info!("Reload requested by {}: {}", ctx.user_id, reason);
        app.shutdown.request(RELOAD_EXIT_CODE);

        Ok(())
    }
}

/// Runs the apprenticeship sync on demand instead of waiting for the hourly job.
pub struct SyncApprenticeshipsCommand;

#[async_trait]
impl SlashCommand for SyncApprenticeshipsCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new(
            "sync-apprenticeships",
            "Scrape and announce new apprenticeships now",
        )
        .owner_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        _ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        if app.sync_running.load(Ordering::SeqCst) {
            return reply
                .send(Reply::text("An apprenticeship sync is already running").ephemeral())
                .await;
        }

        let background = app.clone();
        tokio::spawn(async move {
            match sync_if_idle(&background).await {
                Ok(Some(summary)) => {
                    tracing::info!("Manual apprenticeship sync finished: {}", summary)
                }
                Ok(None) => tracing::info!("Apprenticeship sync already running, skipped"),
                Err(e) => tracing::error!("Manual apprenticeship sync failed: {}", e),
            }
        });

        reply
            .send(Reply::text("Started apprenticeship sync").ephemeral())
            .await
    }
}
