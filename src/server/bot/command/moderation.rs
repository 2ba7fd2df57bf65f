//! Guild moderation commands.
//!
//! Each command performs the Discord action first and only records it once Discord
//! accepted it. Recording publishes a `ModerationActionEvent`, which the audit listener
//! turns into audit channel posts and direct messages.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serenity::all::{ChannelId, EditMember, GetMessages, GuildId, Permissions, UserId};

use crate::server::{
    bot::{
        command::{
            options::InteractionContext, CommandDescriptor, OptionDescriptor, OptionKind,
            SlashCommand,
        },
        context::BotContext,
        reply::{Reply, ReplySink},
    },
    error::command::CommandError,
    model::moderation::{CreateModerationParam, CreateSoftBanParam, ModerationKind},
    service::moderation::ModerationService,
    util::time::to_discord_timestamp,
};

/// Longest timeout Discord accepts, 28 days.
const MAX_TIMEOUT_MINUTES: u64 = 40_320;

fn user_option(description: &'static str) -> OptionDescriptor {
    OptionDescriptor::new(OptionKind::User, "user", description).required()
}

fn reason_option(description: &'static str) -> OptionDescriptor {
    OptionDescriptor::new(OptionKind::String, "reason", description).required()
}

/// Resolves the guild, subject and reason shared by every targeted action.
fn target(ctx: &InteractionContext, verb: &str) -> Result<(u64, u64, String), CommandError> {
    let guild_id = ctx.require_guild()?;
    let user_id = ctx.user("user")?;
    let reason = ctx.string("reason")?.trim().to_string();

    if user_id == ctx.user_id {
        return Err(CommandError::Validation(format!("You cannot {} yourself", verb)));
    }
    if reason.is_empty() {
        return Err(CommandError::Validation("A reason is required".to_string()));
    }

    Ok((guild_id, user_id, reason))
}

/// Integer option checked against inclusive bounds.
fn bounded(ctx: &InteractionContext, name: &str, min: i64, max: i64) -> Result<i64, CommandError> {
    let value = ctx.integer(name)?;
    if !(min..=max).contains(&value) {
        return Err(CommandError::Validation(format!(
            "`{}` must be between {} and {}",
            name, min, max
        )));
    }
    Ok(value)
}

/// Turns a rejected Discord action into a message for the moderator.
fn action_failed(verb: &str, err: serenity::Error) -> CommandError {
    tracing::warn!("Failed to {} user: {}", verb, err);
    CommandError::Validation(format!("Failed to {} user: {}", verb, err))
}

fn param(
    kind: ModerationKind,
    ctx: &InteractionContext,
    guild_id: u64,
    user_id: u64,
    reason: String,
) -> CreateModerationParam {
    CreateModerationParam {
        kind,
        guild_id,
        user_id,
        actor_id: ctx.user_id,
        reason,
        timeout_until: None,
    }
}

pub struct WarnCommand;

#[async_trait]
impl SlashCommand for WarnCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("warn", "Warn a user")
            .option(user_option("The user to warn"))
            .option(reason_option("The reason for the warning"))
            .permissions(Permissions::KICK_MEMBERS)
            .guild_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let (guild_id, user_id, reason) = target(ctx, "warn")?;

        let record = ModerationService::new(&app.db, &app.events)
            .record(param(ModerationKind::Warn, ctx, guild_id, user_id, reason))
            .await?;

        reply
            .send(Reply::text(format!("Warned <@{}> for {}", user_id, record.reason)))
            .await
    }
}

pub struct KickCommand;

#[async_trait]
impl SlashCommand for KickCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("kick", "Kick a user from the server")
            .option(user_option("The user to kick"))
            .option(reason_option("The reason for the kick"))
            .permissions(Permissions::KICK_MEMBERS)
            .guild_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let (guild_id, user_id, reason) = target(ctx, "kick")?;

        GuildId::new(guild_id)
            .kick_with_reason(&app.http, UserId::new(user_id), &reason)
            .await
            .map_err(|e| action_failed("kick", e))?;

        ModerationService::new(&app.db, &app.events)
            .record(param(ModerationKind::Kick, ctx, guild_id, user_id, reason))
            .await?;

        reply.send(Reply::text("Successfully kicked the user")).await
    }
}

pub struct BanCommand;

#[async_trait]
impl SlashCommand for BanCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("ban", "Ban a user from the server")
            .option(user_option("The user to ban"))
            .option(reason_option("The reason for the ban"))
            .option(
                OptionDescriptor::new(
                    OptionKind::Integer,
                    "message_duration",
                    "The amount of days to delete the messages of the user",
                )
                .range(0, 7),
            )
            .permissions(Permissions::BAN_MEMBERS)
            .guild_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let (guild_id, user_id, reason) = target(ctx, "ban")?;
        let delete_days = match ctx.optional_integer("message_duration")? {
            Some(_) => bounded(ctx, "message_duration", 0, 7)? as u8,
            None => 0,
        };

        GuildId::new(guild_id)
            .ban_with_reason(&app.http, UserId::new(user_id), delete_days, &reason)
            .await
            .map_err(|e| action_failed("ban", e))?;

        ModerationService::new(&app.db, &app.events)
            .record(param(ModerationKind::Ban, ctx, guild_id, user_id, reason))
            .await?;

        reply.send(Reply::text("Successfully banned the user")).await
    }
}

/// Bans a user and lifts the ban automatically after a number of days.
pub struct SoftBanCommand;

#[async_trait]
impl SlashCommand for SoftBanCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("softban", "Bans a user for a short period of time")
            .option(user_option("The user to ban"))
            .option(reason_option("The reason for the ban"))
            .option(
                OptionDescriptor::new(
                    OptionKind::Integer,
                    "duration",
                    "The duration of the ban in days",
                )
                .required()
                .range(0, 360),
            )
            .permissions(Permissions::BAN_MEMBERS)
            .guild_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let (guild_id, user_id, reason) = target(ctx, "ban")?;
        let days = bounded(ctx, "duration", 0, 360)? as i32;

        let name = match app.http.get_user(UserId::new(user_id)).await {
            Ok(user) => user.name,
            Err(_) => user_id.to_string(),
        };

        GuildId::new(guild_id)
            .ban_with_reason(&app.http, UserId::new(user_id), 0, &reason)
            .await
            .map_err(|e| action_failed("ban", e))?;

        ModerationService::new(&app.db, &app.events)
            .record_soft_ban(CreateSoftBanParam {
                guild_id,
                user_id,
                actor_id: ctx.user_id,
                reason,
                days,
            })
            .await?;

        reply
            .send(Reply::text(format!("Banned user {} for {} days", name, days)))
            .await
    }
}

pub struct TimeOutCommand;

#[async_trait]
impl SlashCommand for TimeOutCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("time-out", "Time out a user")
            .option(user_option("The user to time out"))
            .option(reason_option("The reason for the time out"))
            .option(
                OptionDescriptor::new(
                    OptionKind::Integer,
                    "duration",
                    "The length of the time out in minutes",
                )
                .required()
                .range(1, MAX_TIMEOUT_MINUTES),
            )
            .permissions(Permissions::MODERATE_MEMBERS)
            .guild_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let (guild_id, user_id, reason) = target(ctx, "time out")?;
        let minutes = bounded(ctx, "duration", 1, MAX_TIMEOUT_MINUTES as i64)?;
        let until = Utc::now() + Duration::minutes(minutes);

        let timestamp = to_discord_timestamp(until)?;

        GuildId::new(guild_id)
            .edit_member(
                &app.http,
                UserId::new(user_id),
                EditMember::new()
                    .disable_communication_until_datetime(timestamp)
                    .audit_log_reason(&reason),
            )
            .await
            .map_err(|e| action_failed("time out", e))?;

        let mut param = param(ModerationKind::TimeOut, ctx, guild_id, user_id, reason);
        param.timeout_until = Some(until);
        ModerationService::new(&app.db, &app.events)
            .record(param)
            .await?;

        reply
            .send(Reply::text(format!(
                "Timed out <@{}> until <t:{}:f>",
                user_id,
                until.timestamp()
            )))
            .await
    }
}

/// Bulk deletes recent messages from a channel.
pub struct DeleteMessagesCommand;

#[async_trait]
impl SlashCommand for DeleteMessagesCommand {
    fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor::new("delete-messages", "Delete messages from a channel")
            .option(
                OptionDescriptor::new(
                    OptionKind::Integer,
                    "amount",
                    "The amount of messages to delete",
                )
                .required()
                .range(1, 100),
            )
            .option(OptionDescriptor::new(
                OptionKind::Channel,
                "channel",
                "The channel to delete messages from",
            ))
            .permissions(Permissions::MANAGE_MESSAGES)
            .guild_only()
    }

    async fn execute(
        &self,
        app: &BotContext,
        ctx: &InteractionContext,
        reply: &dyn ReplySink,
    ) -> Result<(), CommandError> {
        let guild_id = ctx.require_guild()?;
        let amount = bounded(ctx, "amount", 1, 100)? as u8;
        let channel = ChannelId::new(ctx.optional_channel("channel")?.unwrap_or(ctx.channel_id));

        let messages = channel
            .messages(&app.http, GetMessages::new().limit(amount))
            .await
            .map_err(|e| action_failed("fetch messages for", e))?;

        // Bulk delete rejects fewer than two messages.
        match messages.as_slice() {
            [] => {}
            [single] => channel
                .delete_message(&app.http, single.id)
                .await
                .map_err(|e| action_failed("delete messages from", e))?,
            many => channel
                .delete_messages(&app.http, many)
                .await
                .map_err(|e| action_failed("delete messages from", e))?,
        }

        let deleted = messages.len() as u64;
        ModerationService::new(&app.db, &app.events)
            .record_purge(guild_id, ctx.user_id, deleted, None)
            .await;

        reply
            .send(Reply::text(format!("Deleted {} messages", deleted)).ephemeral())
            .await
    }
}

#[cfg(test)]
mod tests {
    use test_utils::builder::TestBuilder;

    use super::*;
    use crate::server::{
        bot::{command::options::OptionValue, reply::RecordingSink},
        data::moderation_action::ModerationActionRepository,
    };

    fn warn_ctx(user: u64, reason: &str) -> InteractionContext {
        InteractionContext::new("warn", 7)
            .in_guild(1, 10)
            .with_option("user", OptionValue::User(user))
            .with_option("reason", OptionValue::String(reason.to_string()))
    }

    /// Tests warning a user end to end.
    ///
    /// Expected: the warn is stored against the guild and the moderator gets a confirmation
    #[tokio::test]
    async fn warn_records_action_and_confirms() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::ModerationAction)
            .build()
            .await
            .unwrap();
        let (app, _rx) = BotContext::for_test(test.db.clone().unwrap());
        let sink = RecordingSink::new();

        WarnCommand
            .execute(&app, &warn_ctx(99, "Spamming"), &sink)
            .await
            .unwrap();

        assert_eq!(
            sink.replies(),
            vec![Reply::text("Warned <@99> for Spamming")]
        );
        let warns = ModerationActionRepository::new(&app.db)
            .get_by_user(1, 99, ModerationKind::Warn)
            .await
            .unwrap();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].actor_id, 7);
        assert_eq!(warns[0].reason, "Spamming");
    }

    #[tokio::test]
    async fn warn_rejects_self_target() {
        let test = TestBuilder::new().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.unwrap());
        let sink = RecordingSink::new();

        let result = WarnCommand.execute(&app, &warn_ctx(7, "Spamming"), &sink).await;

        assert!(matches!(result, Err(CommandError::Validation(_))));
        assert!(sink.replies().is_empty());
    }

    #[tokio::test]
    async fn warn_rejects_blank_reason() {
        let test = TestBuilder::new().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.unwrap());

        let result = WarnCommand
            .execute(&app, &warn_ctx(99, "   "), &RecordingSink::new())
            .await;

        assert!(matches!(result, Err(CommandError::Validation(_))));
    }

    #[tokio::test]
    async fn moderation_requires_a_guild() {
        let test = TestBuilder::new().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.unwrap());
        let ctx = InteractionContext::new("kick", 7)
            .with_option("user", OptionValue::User(99))
            .with_option("reason", OptionValue::String("r".to_string()));

        let result = KickCommand.execute(&app, &ctx, &RecordingSink::new()).await;

        assert!(matches!(result, Err(CommandError::GuildOnly)));
    }

    #[tokio::test]
    async fn soft_ban_rejects_out_of_range_duration() {
        let test = TestBuilder::new().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.unwrap());
        let ctx = warn_ctx(99, "Raid").with_option("duration", OptionValue::Integer(400));

        let result = SoftBanCommand.execute(&app, &ctx, &RecordingSink::new()).await;

        assert!(matches!(result, Err(CommandError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_messages_rejects_zero_amount() {
        let test = TestBuilder::new().build().await.unwrap();
        let (app, _rx) = BotContext::for_test(test.db.unwrap());
        let ctx = InteractionContext::new("delete-messages", 7)
            .in_guild(1, 10)
            .with_option("amount", OptionValue::Integer(0));

        let result = DeleteMessagesCommand
            .execute(&app, &ctx, &RecordingSink::new())
            .await;

        assert!(matches!(result, Err(CommandError::Validation(_))));
    }

    #[test]
    fn moderation_commands_are_guild_only_with_permissions() {
        let commands: [&dyn SlashCommand; 6] = [
            &WarnCommand,
            &KickCommand,
            &BanCommand,
            &SoftBanCommand,
            &TimeOutCommand,
            &DeleteMessagesCommand,
        ];

        for command in commands {
            let descriptor = command.descriptor();
            assert_eq!(descriptor.scope, crate::server::bot::command::CommandScope::Guild);
            assert!(descriptor.required_permissions.is_some(), "{}", descriptor.name);
            assert!(!descriptor.owner_only);
        }
    }
}
