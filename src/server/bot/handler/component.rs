//! Button presses on paged audit messages.
//!
//! Only the user who ran the original command may use its buttons. Page buttons replace
//! the message with a freshly rendered page; the delete button removes it.

use chrono::Utc;
use serenity::all::{ComponentInteraction, CreateInteractionResponse, Message};

use crate::server::{
    bot::{
        command::router::failure_reply,
        context::BotContext,
        pagination::{decode, ComponentAction, PageToken},
        reply::{InteractionResponder, InteractionTarget, Reply, ReplySink},
    },
    error::command::CommandError,
    service::audit::{AuditPage, AuditService},
};

pub const NOT_YOUR_BUTTON_MESSAGE: &str = "Do not click buttons that are not yours.";

/// What to do with a button press.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentPlan {
    /// Not one of our tokens.
    Ignore,
    /// Pressed by someone other than the invoking user.
    Reject,
    Delete,
    Render(PageToken),
}

/// Decides how to answer a button press.
///
/// # Arguments
/// - `custom_id` - Custom id of the pressed button
/// - `clicker` - User who pressed the button
/// - `invoker` - User who ran the command that produced the message, when known
pub fn plan(custom_id: &str, clicker: u64, invoker: Option<u64>) -> ComponentPlan {
    let Some(action) = decode(custom_id) else {
        return ComponentPlan::Ignore;
    };

    if invoker.is_some_and(|id| id != clicker) {
        return ComponentPlan::Reject;
    }

    match action {
        ComponentAction::Delete => ComponentPlan::Delete,
        ComponentAction::Page(token) => ComponentPlan::Render(token),
    }
}

#[allow(deprecated)]
fn invoker(message: &Message) -> Option<u64> {
    message.interaction.as_ref().map(|i| i.user.id.get())
}

pub async fn handle_component(app: &BotContext, interaction: ComponentInteraction) {
    let clicker = interaction.user.id.get();
    let plan = plan(
        &interaction.data.custom_id,
        clicker,
        invoker(&interaction.message),
    );

    match plan {
        ComponentPlan::Ignore => {
            tracing::debug!("Ignoring unknown component {}", interaction.data.custom_id);
        }
        ComponentPlan::Reject => {
            let responder = InteractionResponder::new(
                app.http.clone(),
                InteractionTarget::Component(interaction),
            );
            if let Err(e) = responder
                .send(Reply::text(NOT_YOUR_BUTTON_MESSAGE).ephemeral())
                .await
            {
                tracing::error!("Failed to reject button press: {}", e);
            }
        }
        ComponentPlan::Delete => {
            if let Err(e) = interaction.message.delete(&app.http).await {
                tracing::warn!("Failed to delete paged message: {}", e);
            }
            if let Err(e) = interaction
                .create_response(&app.http, CreateInteractionResponse::Acknowledge)
                .await
            {
                tracing::warn!("Failed to acknowledge delete button: {}", e);
            }
        }
        ComponentPlan::Render(token) => {
            let page = audit_page(
                token,
                interaction.guild_id.map(|id| id.get()),
                &interaction.user.name,
            );
            let reply = match page {
                Ok(page) => {
                    if let Err(e) = interaction.message.delete(&app.http).await {
                        tracing::warn!("Failed to delete previous page: {}", e);
                    }
                    AuditService::new(&app.db).render(&page, Utc::now()).await
                }
                Err(e) => Err(e),
            }
            .unwrap_or_else(|e| failure_reply("Page button", &e));

            let responder = InteractionResponder::new(
                app.http.clone(),
                InteractionTarget::Component(interaction),
            );
            if let Err(e) = responder.send(reply).await {
                tracing::error!("Failed to send audit page: {}", e);
            }
        }
    }
}

/// The page a button press asks for.
///
/// # Returns
/// - `Ok(AuditPage)` - The press came from a guild message
/// - `Err(CommandError::GuildOnly)` - The press came from a direct message
fn audit_page(
    token: PageToken,
    guild_id: Option<u64>,
    requested_by: &str,
) -> Result<AuditPage, CommandError> {
    Ok(AuditPage {
        guild_id: guild_id.ok_or(CommandError::GuildOnly)?,
        tag: token.tag,
        index: token.target_page(),
        subject: token.subject,
        requested_by: requested_by.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::bot::pagination::{Direction, PageTag};

    #[test]
    fn unknown_tokens_are_ignored() {
        assert_eq!(plan("vote_yes", 1, Some(1)), ComponentPlan::Ignore);
        assert_eq!(plan("next_x_WARN_AUDIT", 1, Some(1)), ComponentPlan::Ignore);
    }

    #[test]
    fn other_users_are_rejected() {
        assert_eq!(plan("delete", 2, Some(1)), ComponentPlan::Reject);
        assert_eq!(plan("next_0_RELOAD_AUDIT", 2, Some(1)), ComponentPlan::Reject);
    }

    #[test]
    fn invoker_gets_page_and_delete() {
        assert_eq!(plan("delete", 1, Some(1)), ComponentPlan::Delete);
        assert_eq!(
            plan("next_1_KICK_AUDIT_9", 1, Some(1)),
            ComponentPlan::Render(PageToken::new(
                Direction::Next,
                1,
                PageTag::KickAudit,
                Some(9)
            ))
        );
    }

    #[test]
    fn page_press_targets_the_guild_and_requested_page() {
        let token = PageToken::new(Direction::Prev, 2, PageTag::WarnAudit, Some(9));

        assert_eq!(
            audit_page(token, Some(77), "mod").unwrap(),
            AuditPage {
                guild_id: 77,
                tag: PageTag::WarnAudit,
                index: 1,
                subject: Some(9),
                requested_by: "mod".to_string(),
            }
        );
    }

    #[test]
    fn page_press_outside_a_guild_is_guild_only() {
        let token = PageToken::new(Direction::Next, 0, PageTag::ReloadAudit, None);

        assert!(matches!(
            audit_page(token, None, "mod"),
            Err(CommandError::GuildOnly)
        ));
    }

    #[test]
    fn unknown_invoker_is_allowed() {
        assert_eq!(plan("delete", 5, None), ComponentPlan::Delete);
    }
}
