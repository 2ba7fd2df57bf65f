//! Dispatches interactions to registered commands.

use serenity::all::{Command, Http};

use crate::server::{
    bot::{
        command::{options::InteractionContext, registry::CommandRegistry},
        context::BotContext,
        reply::{Reply, ReplySink},
    },
    error::command::CommandError,
};

pub const NOT_OWNER_MESSAGE: &str =
    "You are not the owner of this bot, you cannot use this command";

const INTERNAL_ERROR_MESSAGE: &str = "Error: Something went wrong while running this command";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The handler ran, successfully or not.
    Invoked,
    /// An owner-only command was used by someone else.
    Denied,
    /// No command is registered under the name.
    NotFound,
}

pub struct CommandRouter {
    registry: CommandRegistry,
    owner_id: u64,
}

impl CommandRouter {
    pub fn new(registry: CommandRegistry, owner_id: u64) -> Self {
        Self { registry, owner_id }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Runs the command named in `ctx`.
    ///
    /// Owner-only commands from anyone but the owner get a single denial reply and the
    /// handler is not invoked. Handler errors are answered with an ephemeral
    /// `Error: <message>` when caused by the user, or a generic message otherwise.
    pub async fn route(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> RouteOutcome {
        let Some(registered) = self.registry.get(&ctx.command) else {
            tracing::warn!("Received unknown command {}", ctx.command);
            return RouteOutcome::NotFound;
        };

        if registered.descriptor.owner_only && ctx.user_id != self.owner_id {
            tracing::info!(
                "Denied owner-only command {} to user {}",
                ctx.command,
                ctx.user_id
            );
            if let Err(e) = reply.send(Reply::text(NOT_OWNER_MESSAGE).ephemeral()).await {
                tracing::error!("Failed to send owner denial: {}", e);
            }
            return RouteOutcome::Denied;
        }

        if let Err(e) = registered.command.execute(app, ctx, reply).await {
            report_failure(ctx, e, reply).await;
        }

        RouteOutcome::Invoked
    }

    /// Names in `remote` that no registered command claims.
    pub fn stale_commands<'a>(&self, remote: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        remote
            .into_iter()
            .filter(|name| !self.registry.contains(name))
            .collect()
    }

    /// Registers every command globally and deletes remote commands that are no longer
    /// registered.
    ///
    /// Individual create and delete failures are logged and skipped.
    ///
    /// # Returns
    /// - `Ok(())` - Sync finished
    /// - `Err(serenity::Error)` - The remote command list could not be fetched
    pub async fn sync(&self, http: &Http) -> Result<(), serenity::Error> {
        for descriptor in self.registry.descriptors() {
            let command = descriptor.to_create_command();
            if let Err(e) = Command::create_global_command(http, command).await {
                tracing::error!("Failed to register command {}: {}", descriptor.name, e);
            }
        }

        let remote = Command::get_global_commands(http).await?;
        let stale = self.stale_commands(remote.iter().map(|command| command.name.as_str()));

        for command in remote.iter().filter(|c| stale.contains(&c.name.as_str())) {
            match Command::delete_global_command(http, command.id).await {
                Ok(()) => tracing::info!("Deleted stale command {}", command.name),
                Err(e) => tracing::warn!("Failed to delete stale command {}: {}", command.name, e),
            }
        }

        tracing::info!("Synced {} commands", self.registry.len());

        Ok(())
    }
}

async fn report_failure(ctx: &InteractionContext, error: CommandError, reply: &dyn ReplySink) {
    if let Err(e) = reply.send(failure_reply(&ctx.command, &error)).await {
        tracing::error!("Failed to report error for command {}: {}", ctx.command, e);
    }
}

/// Ephemeral reply describing a failed command or button press.
///
/// Only user-facing errors are shown verbatim; everything else is logged.
pub fn failure_reply(source: &str, error: &CommandError) -> Reply {
    let message = if error.is_user_facing() {
        tracing::debug!("{} rejected input: {}", source, error);
        format!("Error: {}", error)
    } else {
        tracing::error!("{} failed: {}", source, error);
        INTERNAL_ERROR_MESSAGE.to_string()
    };

    Reply::text(message).ephemeral()
}
