//! Moderation audit listener.
//!
//! Posts an audit embed to the guild's audit channel for every recorded moderation
//! action and sends the affected user a direct message. Guilds without an audit channel
//! are skipped.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, CreateMessage, Http, UserId};

use crate::server::{
    bot::reply::{EmbedSpec, BOT_COLOUR},
    data::audit_channel::AuditChannelRepository,
    error::event::HandlerError,
    event::{moderation::ModerationActionEvent, Subscriber},
    model::moderation::ModerationKind,
};

const NO_REASON: &str = "No reason provided";

pub struct ModerationAuditListener {
    db: DatabaseConnection,
    http: Arc<Http>,
}

impl ModerationAuditListener {
    pub fn new(db: DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    async fn user_name(&self, user_id: u64) -> String {
        match self.http.get_user(UserId::new(user_id)).await {
            Ok(user) => user.name,
            Err(e) => {
                tracing::warn!("Failed to fetch user {} for audit embed: {}", user_id, e);
                format!("User {}", user_id)
            }
        }
    }
}

#[async_trait]
impl Subscriber<ModerationActionEvent> for ModerationAuditListener {
    async fn handle(&self, event: &ModerationActionEvent) -> Result<(), HandlerError> {
        let Some(channel_id) = AuditChannelRepository::new(&self.db)
            .get(event.guild_id)
            .await?
        else {
            tracing::debug!("Guild {} has no audit channel, skipping", event.guild_id);
            return Ok(());
        };
        let channel = ChannelId::new(channel_id);
        let now = Utc::now();

        if event.kind == ModerationKind::DeleteMessages {
            let message = CreateMessage::new().embed(purge_embed(event, now).to_create_embed());
            channel.send_message(&self.http, message).await?;
            return Ok(());
        }

        let (Some(subject_id), Some(_)) = (event.subject_id, event.action_id) else {
            tracing::debug!(
                "Skipping {} audit without subject or action id",
                event.kind.name()
            );
            return Ok(());
        };

        let user_name = self.user_name(subject_id).await;
        let message =
            CreateMessage::new().embed(audit_embed(event, &user_name, now).to_create_embed());
        channel.send_message(&self.http, message).await?;

        // Users with closed DMs are common, so a failed DM is not an error
        let dm = CreateMessage::new().embed(direct_message_embed(event, now).to_create_embed());
        if let Err(e) = UserId::new(subject_id).direct_message(&self.http, dm).await {
            tracing::warn!("Could not DM user {} about {}: {}", subject_id, event.kind.name(), e);
        }

        Ok(())
    }
}

fn footer_ids(event: &ModerationActionEvent, include_user: bool) -> String {
    let mut parts = Vec::new();
    if include_user {
        if let Some(subject_id) = event.subject_id {
            parts.push(format!("User id: {}", subject_id));
        }
    }
    if let Some(action_id) = event.action_id {
        parts.push(format!("{} id: {}", event.kind.label(), action_id));
    }
    parts.push(format!("Admin id: {}", event.actor_id));
    parts.join(" | ")
}

fn with_details(mut embed: EmbedSpec, event: &ModerationActionEvent) -> EmbedSpec {
    embed = embed.field("Reason", event.reason.as_deref().unwrap_or(NO_REASON), false);
    if let Some(days) = event.soft_ban_days {
        embed = embed.field("Ban Duration", format!("{} days", days), false);
    }
    embed
}

/// Embed posted to the audit channel.
pub fn audit_embed(
    event: &ModerationActionEvent,
    user_name: &str,
    now: DateTime<Utc>,
) -> EmbedSpec {
    let embed = EmbedSpec::new()
        .title(format!("{} was {}", user_name, event.kind.past_tense()))
        .colour(BOT_COLOUR)
        .timestamp(now);

    with_details(embed, event).footer(footer_ids(event, true))
}

/// Embed sent to the affected user.
pub fn direct_message_embed(event: &ModerationActionEvent, now: DateTime<Utc>) -> EmbedSpec {
    let embed = EmbedSpec::new()
        .title(format!("You were {}", event.kind.past_tense()))
        .colour(BOT_COLOUR)
        .timestamp(now);

    with_details(embed, event).footer(footer_ids(event, false))
}

/// Embed posted to the audit channel after a bulk delete.
pub fn purge_embed(event: &ModerationActionEvent, now: DateTime<Utc>) -> EmbedSpec {
    let mut embed = EmbedSpec::new()
        .title("Messages deleted")
        .description(format!(
            "{} messages were deleted",
            event.deleted_count.unwrap_or(0)
        ))
        .colour(BOT_COLOUR)
        .timestamp(now);

    if let Some(reason) = &event.reason {
        embed = embed.field("Reason", reason, false);
    }

    embed.footer(footer_ids(event, false))
}
