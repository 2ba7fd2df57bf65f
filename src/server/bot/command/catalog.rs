//! Static list of every slash command the bot offers.

use std::sync::Arc;

use crate::server::bot::command::{
    audit::{AuditChannelCommand, AuditCommand},
    info::UserInfoCommand,
    moderation::{
        BanCommand, DeleteMessagesCommand, KickCommand, SoftBanCommand, TimeOutCommand,
        WarnCommand,
    },
    owner::{ReloadCommand, ShutdownCommand, SyncApprenticeshipsCommand},
    registry::CommandRegistry,
    utility::{PingCommand, UptimeCommand, ViewApprenticeshipsCommand},
    SlashCommand,
};

/// Every command in registration order.
pub fn commands() -> Vec<Arc<dyn SlashCommand>> {
    vec![
        Arc::new(PingCommand),
        Arc::new(UptimeCommand),
        Arc::new(ViewApprenticeshipsCommand),
        Arc::new(UserInfoCommand),
        Arc::new(ShutdownCommand),
        Arc::new(ReloadCommand),
        Arc::new(SyncApprenticeshipsCommand),
        Arc::new(WarnCommand),
        Arc::new(KickCommand),
        Arc::new(BanCommand),
        Arc::new(SoftBanCommand),
        Arc::new(TimeOutCommand),
        Arc::new(DeleteMessagesCommand),
        Arc::new(AuditChannelCommand),
        Arc::new(AuditCommand),
    ]
}

/// Builds the registry from the command table.
///
/// Commands that fail to register are logged by the registry and left out.
pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    for command in commands() {
        // Failures are logged by the registry.
        let _ = registry.register(command);
    }

    tracing::info!("Registered {} slash commands", registry.len());
    registry
}
