//! Audit channel configuration and audit log views.

use async_trait::async_trait;
use chrono::Utc;
use serenity::all::Permissions;

use crate::server::{
    bot::{
        command::{
            options::InteractionContext, router::NOT_OWNER_MESSAGE, CommandDescriptor,
            OptionDescriptor, OptionKind, SlashCommand, SubcommandDescriptor,
        },
        context::BotContext,
        pagination::PageTag,
        reply::{Reply, ReplySink},
    },
    data::audit_channel::AuditChannelRepository,
    error::command::CommandError,
    model::moderation::ModerationKind,
    service::audit::{AuditPage, AuditService},
};

/// Sets the channel that receives moderation audit posts.
pub struct AuditChannelCommand;

#[async_trait]
impl SlashCommand for AuditChannelCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("audit-channel", "Sets the audit log channel for the server")
            .option(
                OptionDescriptor::new(
                    OptionKind::Channel,
                    "channel",
                    "The channel to set as the audit log channel",
                )
                .required(),
            )
            .option(OptionDescriptor::new(
                OptionKind::Boolean,
                "replace",
                "Replace an audit channel that is already set",
            ))
            .permissions(Permissions::MANAGE_GUILD)
            .guild_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let guild_id = ctx.require_guild()?;
        let channel_id = ctx.channel("channel")?;
        let replace = ctx.options.contains_key("replace") && ctx.boolean("replace")?;
        let repo = AuditChannelRepository::new(&app.db);

        if replace {
            repo.upsert(guild_id, channel_id).await?;
        } else if !repo.set_if_absent(guild_id, channel_id).await? {
            let existing = repo
                .get(guild_id)
                .await?
                .map_or_else(|| "null".to_string(), |id| format!("<#{}>", id));
            return Err(CommandError::Validation(format!(
                "The audit channel has already been set to {}",
                existing
            )));
        }

        reply
            .send(Reply::text(format!(
                "Successfully set the audit log channel to <#{}>",
                channel_id
            )))
            .await
    }
}

const RELOAD_AUDIT: &str = "reload-audit";
const AMOUNT_AUDIT: &str = "amount-audit";
const WARN_BY_ID_AUDIT: &str = "warn-by-id-audit";

/// Per-user audit subcommands and the log each one shows.
const USER_AUDITS: [(&str, &str, PageTag); 5] = [
    ("warn-audit", "Get information about the bot's warn audit logs.", PageTag::WarnAudit),
    ("kick-audit", "Get information about the bot's kick audit logs.", PageTag::KickAudit),
    ("ban-audit", "Get information about the bot's ban audit logs.", PageTag::BanAudit),
    (
        "time-out-audit",
        "Get information about the bot's timeout audit logs.",
        PageTag::TimeOutAudit,
    ),
    (
        "soft-ban-audit",
        "Get information about the bot's soft ban audit logs.",
        PageTag::SoftBanAudit,
    ),
];

/// Moderation types the amount audit can count.
const AMOUNT_CHOICES: [(&str, ModerationKind); 4] = [
    ("warn", ModerationKind::Warn),
    ("kick", ModerationKind::Kick),
    ("ban", ModerationKind::Ban),
    ("time-out", ModerationKind::TimeOut),
];

pub struct AuditCommand;

#[async_trait]
impl SlashCommand for AuditCommand {
    fn descriptor(&self) -> CommandDescriptor {
        let user = || {
            OptionDescriptor::new(OptionKind::User, "user", "The user to get audit logs for.")
                .required()
        };

        let mut descriptor = CommandDescriptor::new(
            "audit",
            "Get information about the bot's audit logs for things such as bans, kicks, and reloads.",
        )
        .subcommand(SubcommandDescriptor::new(
            RELOAD_AUDIT,
            "Get information about the bot's reload audit logs.",
        ));

        for (name, description, _) in USER_AUDITS {
            descriptor =
                descriptor.subcommand(SubcommandDescriptor::new(name, description).option(user()));
        }

        descriptor
            .subcommand(
                SubcommandDescriptor::new(
                    AMOUNT_AUDIT,
                    "Get information about the bot's amount audit logs for a certain moderation.",
                )
                .option(user())
                .option(
                    OptionDescriptor::new(
                        OptionKind::String,
                        "moderation-type",
                        "The moderation type to count",
                    )
                    .required()
                    .choices(&AMOUNT_CHOICES.map(|(name, _)| name)),
                ),
            )
            .subcommand(
                SubcommandDescriptor::new(WARN_BY_ID_AUDIT, "Get a single warn by its id.").option(
                    OptionDescriptor::new(OptionKind::String, "warn-id", "The id of the warn")
                        .required(),
                ),
            )
            .permissions(Permissions::VIEW_AUDIT_LOG)
            .guild_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let guild_id = ctx.require_guild()?;
        let subcommand = ctx
            .subcommand
            .as_deref()
            .ok_or_else(|| CommandError::Validation("Choose an audit log to view".to_string()))?;
        let service = AuditService::new(&app.db);
        let now = Utc::now();

        let rendered = match subcommand {
            RELOAD_AUDIT => {
                if ctx.user_id != app.config.owner_id {
                    return Err(CommandError::PermissionDenied(NOT_OWNER_MESSAGE.to_string()));
                }
                service
                    .render(&first_page(ctx, guild_id, PageTag::ReloadAudit, None), now)
                    .await?
            }
            AMOUNT_AUDIT => {
                let choice = ctx.string("moderation-type")?;
                let kind = AMOUNT_CHOICES
                    .iter()
                    .find(|(name, _)| *name == choice)
                    .map(|(_, kind)| *kind)
                    .ok_or_else(|| CommandError::Validation("Invalid choice".to_string()))?;
                service
                    .amount(guild_id, ctx.user("user")?, &[kind], &ctx.user_name, now)
                    .await?
            }
            WARN_BY_ID_AUDIT => {
                let warn_id = ctx
                    .string("warn-id")?
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| {
                        CommandError::Validation("Please provide a valid warn id".to_string())
                    })?;
                service
                    .warn_by_id(guild_id, warn_id, &ctx.user_name, now)
                    .await?
            }
            other => {
                let tag = USER_AUDITS
                    .iter()
                    .find(|(name, _, _)| *name == other)
                    .map(|(_, _, tag)| *tag)
                    .ok_or_else(|| {
                        CommandError::Validation(format!("Unknown audit log `{}`", other))
                    })?;
                let subject = ctx.user("user")?;
                service
                    .render(&first_page(ctx, guild_id, tag, Some(subject)), now)
                    .await?
            }
        };

        reply.send(rendered).await
    }
}

fn first_page(
    ctx: &InteractionContext,
    guild_id: u64,
    tag: PageTag,
    subject: Option<u64>,
) -> AuditPage {
    AuditPage {
        guild_id,
        tag,
        index: 0,
        subject,
        requested_by: ctx.user_name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use test_utils::builder::TestBuilder;

    use super::*;
    use crate::server::{
        bot::{command::options::OptionValue, reply::RecordingSink},
        data::reload_audit::ReloadAuditRepository,
    };

    fn audit_channel_ctx(channel: u64) -> InteractionContext {
        InteractionContext::new("audit-channel", 7)
            .in_guild(1, 10)
            .with_option("channel", OptionValue::Channel(channel))
    }

    #[tokio::test]
    async fn audit_channel_is_set_once() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.clone().unwrap());
        let sink = RecordingSink::new();

        AuditChannelCommand
            .execute(&app, &audit_channel_ctx(100), &sink)
            .await
            .unwrap();
        let second = AuditChannelCommand
            .execute(&app, &audit_channel_ctx(200), &sink)
            .await;

        assert_eq!(
            sink.replies(),
            vec![Reply::text("Successfully set the audit log channel to <#100>")]
        );
        match second {
            Err(CommandError::Validation(message)) => {
                assert_eq!(message, "The audit channel has already been set to <#100>")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn audit_channel_replace_overwrites() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.clone().unwrap());
        let sink = RecordingSink::new();

        AuditChannelCommand
            .execute(&app, &audit_channel_ctx(100), &sink)
            .await
            .unwrap();
        AuditChannelCommand
            .execute(
                &app,
                &audit_channel_ctx(200).with_option("replace", OptionValue::Boolean(true)),
                &sink,
            )
            .await
            .unwrap();

        assert_eq!(
            AuditChannelRepository::new(&app.db).get(1).await.unwrap(),
            Some(200)
        );
    }

    #[tokio::test]
    async fn reload_audit_is_owner_only() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.clone().unwrap());
        let ctx = InteractionContext::new("audit", 7)
            .in_guild(1, 10)
            .with_subcommand(RELOAD_AUDIT);

        let result = AuditCommand.execute(&app, &ctx, &RecordingSink::new()).await;

        assert!(matches!(result, Err(CommandError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn reload_audit_lists_entries_for_owner() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.clone().unwrap());
        ReloadAuditRepository::new(&app.db)
            .create(42, "deploy")
            .await
            .unwrap();
        let sink = RecordingSink::new();
        let ctx = InteractionContext::new("audit", 42)
            .in_guild(1, 10)
            .with_subcommand(RELOAD_AUDIT);

        AuditCommand.execute(&app, &ctx, &sink).await.unwrap();

        let replies = sink.replies();
        assert_eq!(replies[0].embeds[0].title.as_deref(), Some("Reload Audit Logs"));
        assert!(replies[0].embeds[0].fields[0].value.contains("Reason: deploy"));
        assert_eq!(replies[0].buttons[0].custom_id, "prev_0_RELOAD_AUDIT");
    }

    #[tokio::test]
    async fn warn_by_id_rejects_non_numeric_id() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.clone().unwrap());
        let ctx = InteractionContext::new("audit", 7)
            .in_guild(1, 10)
            .with_subcommand(WARN_BY_ID_AUDIT)
            .with_option("warn-id", OptionValue::String("abc".to_string()));

        let result = AuditCommand.execute(&app, &ctx, &RecordingSink::new()).await;

        assert!(matches!(result, Err(CommandError::Validation(_))));
    }

    #[test]
    fn descriptor_lists_every_audit_subcommand() {
        let names: Vec<_> = AuditCommand
            .descriptor()
            .subcommands
            .iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "reload-audit",
                "warn-audit",
                "kick-audit",
                "ban-audit",
                "time-out-audit",
                "soft-ban-audit",
                "amount-audit",
                "warn-by-id-audit",
            ]
        );
    }
}
