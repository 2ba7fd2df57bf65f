//! Outbound replies and embeds.
//!
//! Commands and listeners describe what to send with `Reply` and `EmbedSpec`, which are
//! plain data and can be asserted on in tests. `InteractionResponder` turns them into
//! serenity builders and sends them as the interaction response or a followup.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::all::{
    ButtonStyle, Colour, CommandInteraction, ComponentInteraction, CreateActionRow, CreateButton,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, Http,
};

use crate::server::{error::command::CommandError, util::time::to_discord_timestamp};

/// Maximum number of fields Discord accepts on one embed.
pub const MAX_EMBED_FIELDS: usize = 25;

/// Purple used on moderation and utility embeds.
pub const BOT_COLOUR: u32 = 0x9457EB;

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

/// Description of an embed, independent of the Discord builder types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedSpec {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<EmbedFooter>,
    pub colour: Option<u32>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl EmbedSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url: None,
        });
        self
    }

    pub fn footer_with_icon(
        mut self,
        text: impl Into<String>,
        icon_url: impl Into<String>,
    ) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url: Some(icon_url.into()),
        });
        self
    }

    pub fn colour(mut self, colour: u32) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Fields as they will be sent.
    ///
    /// Up to 25 fields pass through unchanged. Beyond that the first 24 are kept and a
    /// final "More results truncated" field takes the last slot.
    pub fn sendable_fields(&self) -> Vec<EmbedField> {
        if self.fields.len() <= MAX_EMBED_FIELDS {
            return self.fields.clone();
        }

        let mut fields = self.fields[..MAX_EMBED_FIELDS - 1].to_vec();
        fields.push(EmbedField {
            name: "More results truncated".to_string(),
            value: format!(
                "{} more entries were not shown",
                self.fields.len() - (MAX_EMBED_FIELDS - 1)
            ),
            inline: false,
        });
        fields
    }

    pub fn to_create_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new();

        if let Some(title) = &self.title {
            embed = embed.title(title);
        }
        if let Some(url) = &self.url {
            embed = embed.url(url);
        }
        if let Some(description) = &self.description {
            embed = embed.description(description);
        }

        embed = embed.fields(
            self.sendable_fields()
                .into_iter()
                .map(|field| (field.name, field.value, field.inline)),
        );

        if let Some(footer) = &self.footer {
            let mut create_footer = CreateEmbedFooter::new(&footer.text);
            if let Some(icon_url) = &footer.icon_url {
                create_footer = create_footer.icon_url(icon_url);
            }
            embed = embed.footer(create_footer);
        }
        if let Some(colour) = self.colour {
            embed = embed.colour(Colour::new(colour));
        }
        if let Some(timestamp) = self.timestamp {
            match to_discord_timestamp(timestamp) {
                Ok(timestamp) => embed = embed.timestamp(timestamp),
                Err(e) => tracing::warn!("Dropping embed timestamp: {}", e),
            }
        }

        embed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplyButton {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

impl ReplyButton {
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
        }
    }

    fn to_create_button(&self) -> CreateButton {
        CreateButton::new(&self.custom_id)
            .label(&self.label)
            .style(self.style)
    }
}

/// A message sent in answer to an interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub content: Option<String>,
    pub embeds: Vec<EmbedSpec>,
    /// Rendered as a single action row.
    pub buttons: Vec<ReplyButton>,
    /// Only visible to the invoking user.
    pub ephemeral: bool,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn embed(embed: EmbedSpec) -> Self {
        Self {
            embeds: vec![embed],
            ..Default::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<ReplyButton>) -> Self {
        self.buttons = buttons;
        self
    }

    fn components(&self) -> Vec<CreateActionRow> {
        if self.buttons.is_empty() {
            return Vec::new();
        }

        vec![CreateActionRow::Buttons(
            self.buttons.iter().map(ReplyButton::to_create_button).collect(),
        )]
    }

    fn create_embeds(&self) -> Vec<CreateEmbed> {
        self.embeds.iter().map(EmbedSpec::to_create_embed).collect()
    }

    fn to_response(&self) -> CreateInteractionResponse {
        let mut message = CreateInteractionResponseMessage::new()
            .embeds(self.create_embeds())
            .components(self.components())
            .ephemeral(self.ephemeral);
        if let Some(content) = &self.content {
            message = message.content(content);
        }

        CreateInteractionResponse::Message(message)
    }

    fn to_followup(&self) -> CreateInteractionResponseFollowup {
        let mut followup = CreateInteractionResponseFollowup::new()
            .embeds(self.create_embeds())
            .components(self.components())
            .ephemeral(self.ephemeral);
        if let Some(content) = &self.content {
            followup = followup.content(content);
        }

        followup
    }
}

/// Destination for replies to a single interaction.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, reply: Reply) -> Result<(), CommandError>;
}

pub enum InteractionTarget {
    Command(CommandInteraction),
    Component(ComponentInteraction),
}

/// Sends replies for a live Discord interaction.
///
/// The first reply becomes the interaction response; later replies are followups.
pub struct InteractionResponder {
    http: Arc<Http>,
    target: InteractionTarget,
    responded: AtomicBool,
}

impl InteractionResponder {
    pub fn new(http: Arc<Http>, target: InteractionTarget) -> Self {
        Self {
            http,
            target,
            responded: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ReplySink for InteractionResponder {
    async fn send(&self, reply: Reply) -> Result<(), CommandError> {
        let first = !self.responded.swap(true, Ordering::SeqCst);

        match (&self.target, first) {
            (InteractionTarget::Command(interaction), true) => {
                interaction
                    .create_response(&self.http, reply.to_response())
                    .await?
            }
            (InteractionTarget::Component(interaction), true) => {
                interaction
                    .create_response(&self.http, reply.to_response())
                    .await?
            }
            (InteractionTarget::Command(interaction), false) => {
                interaction
                    .create_followup(&self.http, reply.to_followup())
                    .await?;
            }
            (InteractionTarget::Component(interaction), false) => {
                interaction
                    .create_followup(&self.http, reply.to_followup())
                    .await?;
            }
        }

        Ok(())
    }
}

/// Sink that records replies instead of sending them.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    pub replies: std::sync::Mutex<Vec<Reply>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ReplySink for RecordingSink {
    async fn send(&self, reply: Reply) -> Result<(), CommandError> {
        self.replies.lock().unwrap().push(reply);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_with_fields(count: usize) -> EmbedSpec {
        (0..count).fold(EmbedSpec::new(), |embed, i| {
            embed.field(format!("Field {}", i), "value", false)
        })
    }

    #[test]
    fn keeps_up_to_25_fields() {
        let fields = embed_with_fields(25).sendable_fields();

        assert_eq!(fields.len(), 25);
        assert_eq!(fields[24].name, "Field 24");
    }

    #[test]
    fn truncates_beyond_25_fields() {
        let fields = embed_with_fields(30).sendable_fields();

        assert_eq!(fields.len(), 25);
        assert_eq!(fields[23].name, "Field 23");
        assert_eq!(fields[24].name, "More results truncated");
        assert_eq!(fields[24].value, "7 more entries were not shown");
    }

    #[test]
    fn builder_serialises_title_and_fields() {
        let embed = EmbedSpec::new()
            .title("Warn Audit Logs")
            .field("Moderation Log", "entry", false)
            .colour(BOT_COLOUR)
            .to_create_embed();

        let json = serde_json::to_value(&embed).unwrap();

        assert_eq!(json["title"], "Warn Audit Logs");
        assert_eq!(json["fields"][0]["name"], "Moderation Log");
        assert_eq!(json["color"], BOT_COLOUR);
    }

    #[test]
    fn text_reply_has_no_components() {
        let reply = Reply::text("pong").ephemeral();

        assert!(reply.ephemeral);
        assert!(reply.components().is_empty());
    }
}
