//! Audit log views.
//!
//! Renders one page of stored moderation history into a reply with pagination buttons.
//! The same renderer serves the `/audit` subcommands and the page buttons, so a button
//! click produces exactly what the original command would have shown for that page.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    bot::{
        pagination::{page_buttons, page_slice, PageTag},
        reply::{EmbedSpec, Reply, BOT_COLOUR},
    },
    data::{
        moderation_action::ModerationActionRepository, reload_audit::ReloadAuditRepository,
        soft_ban::SoftBanRepository,
    },
    error::command::CommandError,
    model::moderation::{ModerationKind, ModerationRecord, SoftBanRecord},
};

/// Kinds that can be counted with the amount audit.
pub const COUNTED_KINDS: [ModerationKind; 4] = [
    ModerationKind::Warn,
    ModerationKind::Kick,
    ModerationKind::Ban,
    ModerationKind::TimeOut,
];

/// Which page of which audit log to show.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditPage {
    pub guild_id: u64,
    pub tag: PageTag,
    pub index: usize,
    /// User whose history is shown; unused by the reload audit.
    pub subject: Option<u64>,
    /// Name shown in the footer.
    pub requested_by: String,
}

pub struct AuditService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Renders a page of an audit log.
    ///
    /// Pages past the end render an embed without log fields. A log with no records at
    /// all renders a plain message instead.
    ///
    /// # Returns
    /// - `Ok(Reply)` - The rendered page
    /// - `Err(CommandError::MissingOption)` - A per-user log was requested without a subject
    /// - `Err(CommandError::Database)` - Records could not be loaded
    pub async fn render(
        &self,
        page: &AuditPage,
        now: DateTime<Utc>,
    ) -> Result<Reply, CommandError> {
        let kind = match page.tag {
            PageTag::ReloadAudit => return self.render_reload(page, now).await,
            PageTag::AmountAudit => {
                let subject = require_subject(page)?;
                return self
                    .amount(
                        page.guild_id,
                        subject,
                        &COUNTED_KINDS,
                        &page.requested_by,
                        now,
                    )
                    .await;
            }
            PageTag::SoftBanAudit => return self.render_soft_bans(page, now).await,
            PageTag::WarnAudit => ModerationKind::Warn,
            PageTag::KickAudit => ModerationKind::Kick,
            PageTag::BanAudit => ModerationKind::Ban,
            PageTag::TimeOutAudit => ModerationKind::TimeOut,
        };

        let subject = require_subject(page)?;
        let records = ModerationActionRepository::new(self.db)
            .get_by_user(page.guild_id, subject, kind)
            .await?;

        if records.is_empty() {
            return Ok(Reply::text(format!(
                "There are no {} audit logs for <@{}>.",
                kind.label().to_lowercase(),
                subject
            )));
        }

        let embed = page_slice(&records, page.index)
            .iter()
            .fold(log_embed(kind, subject, &page.requested_by, now), |embed, record| {
                embed.field("Moderation Log", moderation_log(record), true)
            });

        Ok(Reply::embed(embed).with_buttons(page_buttons(page.tag, page.index, Some(subject))))
    }

    async fn render_reload(
        &self,
        page: &AuditPage,
        now: DateTime<Utc>,
    ) -> Result<Reply, CommandError> {
        let records = ReloadAuditRepository::new(self.db).get_all().await?;

        if records.is_empty() {
            return Ok(Reply::text("There are no reload audit logs."));
        }

        let embed = page_slice(&records, page.index).iter().fold(
            EmbedSpec::new()
                .title("Reload Audit Logs")
                .description("Here are the bots reload audit logs.")
                .colour(BOT_COLOUR)
                .timestamp(now)
                .footer(format!("Requested by {}", page.requested_by)),
            |embed, record| {
                embed.field(
                    "Reload Audit Log",
                    format!(
                        "User: <@{}>\nReason: {}\nTime: {}",
                        record.user_id,
                        record.reason,
                        discord_time(record.created_at)
                    ),
                    true,
                )
            },
        );

        Ok(Reply::embed(embed).with_buttons(page_buttons(page.tag, page.index, None)))
    }

    async fn render_soft_bans(
        &self,
        page: &AuditPage,
        now: DateTime<Utc>,
    ) -> Result<Reply, CommandError> {
        let subject = require_subject(page)?;
        let records = SoftBanRepository::new(self.db)
            .get_by_user(page.guild_id, subject)
            .await?;

        if records.is_empty() {
            return Ok(Reply::text(format!(
                "There are no soft ban audit logs for <@{}>.",
                subject
            )));
        }

        let embed = page_slice(&records, page.index).iter().fold(
            log_embed(ModerationKind::SoftBan, subject, &page.requested_by, now),
            |embed, record| embed.field("Moderation Log", soft_ban_log(record, now), true),
        );

        Ok(Reply::embed(embed).with_buttons(page_buttons(page.tag, page.index, Some(subject))))
    }

    /// Counts how often a user received each of `kinds` in a guild.
    pub async fn amount(
        &self,
        guild_id: u64,
        user_id: u64,
        kinds: &[ModerationKind],
        requested_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Reply, CommandError> {
        let repo = ModerationActionRepository::new(self.db);
        let mut embed = EmbedSpec::new()
            .title("Amount Audit Records")
            .description(format!(
                "This is how often <@{}> has been moderated in this server.",
                user_id
            ))
            .colour(BOT_COLOUR)
            .timestamp(now)
            .footer(format!("Requested by {}", requested_by));

        for kind in kinds {
            let count = repo.count_by_user(guild_id, user_id, *kind).await?;
            let value = if count == 0 {
                format!("This user has never been {} in this server.", kind.past_tense())
            } else {
                format!(
                    "This user has been {} {} times in this server.",
                    kind.past_tense(),
                    count
                )
            };
            embed = embed.field(format!("{} Amount", kind.label()), value, true);
        }

        Ok(Reply::embed(embed))
    }

    /// Shows a single warn by its id.
    ///
    /// # Returns
    /// - `Err(CommandError::NotFound)` - No warn with that id exists in the guild
    pub async fn warn_by_id(
        &self,
        guild_id: u64,
        warn_id: i32,
        requested_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Reply, CommandError> {
        let record = ModerationActionRepository::new(self.db)
            .find_by_id(warn_id)
            .await?
            .filter(|r| r.guild_id == guild_id && r.kind == ModerationKind::Warn)
            .ok_or_else(|| {
                CommandError::NotFound("No audit records found for that warn id".to_string())
            })?;

        let embed = EmbedSpec::new()
            .title(format!("Warn Audit Log for warn id {}", record.id))
            .colour(BOT_COLOUR)
            .timestamp(now)
            .footer(format!("Requested by {}", requested_by))
            .field(
                "Info",
                format!(
                    "User: <@{}>\nReason: {}\nWhen: {}",
                    record.user_id,
                    record.reason,
                    discord_time(record.created_at)
                ),
                true,
            );

        Ok(Reply::embed(embed))
    }
}

fn require_subject(page: &AuditPage) -> Result<u64, CommandError> {
    page.subject
        .ok_or_else(|| CommandError::MissingOption("user".to_string()))
}

fn log_embed(
    kind: ModerationKind,
    subject: u64,
    requested_by: &str,
    now: DateTime<Utc>,
) -> EmbedSpec {
    EmbedSpec::new()
        .title(format!("{} Audit Logs", kind.label()))
        .description(format!(
            "Here are the bots {} audit logs for <@{}>.",
            kind.label().to_lowercase(),
            subject
        ))
        .colour(BOT_COLOUR)
        .timestamp(now)
        .footer(format!("Requested by {}", requested_by))
}

fn discord_time(time: DateTime<Utc>) -> String {
    format!("<t:{}:f>", time.timestamp())
}

fn moderation_log(record: &ModerationRecord) -> String {
    let mut log = format!(
        "User: <@{}>\nReason: {}\nHappened at: {}\nID: {}",
        record.user_id,
        record.reason,
        discord_time(record.created_at),
        record.id
    );
    if let Some(until) = record.timeout_until {
        log.push_str(&format!("\nUntil: {}", discord_time(until)));
    }
    log
}

fn soft_ban_log(record: &SoftBanRecord, now: DateTime<Utc>) -> String {
    let time_left = if record.is_expired(now) {
        "Over".to_string()
    } else {
        format!("<t:{}:R>", record.expires_at().timestamp())
    };

    format!(
        "User: <@{}>\nReason: {}\nHappened at: {}\nID: {}\nAmount of days: {}\nTime left: {}",
        record.user_id,
        record.reason,
        discord_time(record.created_at),
        record.id,
        record.days,
        time_left
    )
}

#[cfg(test)]
mod tests {
    use test_utils::builder::TestBuilder;

    use super::*;
    use crate::server::{
        bot::pagination::PAGE_SIZE,
        model::moderation::{CreateModerationParam, CreateSoftBanParam},
    };

    fn page(tag: PageTag, index: usize, subject: Option<u64>) -> AuditPage {
        AuditPage {
            guild_id: 1,
            tag,
            index,
            subject,
            requested_by: "mod".to_string(),
        }
    }

    async fn warn(db: &DatabaseConnection, user_id: u64, reason: &str) -> ModerationRecord {
        ModerationActionRepository::new(db)
            .create(CreateModerationParam {
                kind: ModerationKind::Warn,
                guild_id: 1,
                user_id,
                actor_id: 3,
                reason: reason.to_string(),
                timeout_until: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn empty_log_renders_plain_message() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let reply = AuditService::new(db)
            .render(&page(PageTag::WarnAudit, 0, Some(2)), Utc::now())
            .await
            .unwrap();

        assert_eq!(reply, Reply::text("There are no warn audit logs for <@2>."));
    }

    #[tokio::test]
    async fn pages_hold_ten_records_with_buttons() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        for i in 0..12 {
            warn(db, 2, &format!("reason {}", i)).await;
        }
        let service = AuditService::new(db);

        let first = service
            .render(&page(PageTag::WarnAudit, 0, Some(2)), Utc::now())
            .await
            .unwrap();
        let second = service
            .render(&page(PageTag::WarnAudit, 1, Some(2)), Utc::now())
            .await
            .unwrap();

        assert_eq!(first.embeds[0].fields.len(), PAGE_SIZE);
        assert_eq!(first.embeds[0].title.as_deref(), Some("Warn Audit Logs"));
        assert_eq!(second.embeds[0].fields.len(), 2);
        assert_eq!(second.buttons[1].custom_id, "next_1_WARN_AUDIT_2");
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        warn(db, 2, "spam").await;

        let reply = AuditService::new(db)
            .render(&page(PageTag::WarnAudit, 5, Some(2)), Utc::now())
            .await
            .unwrap();

        assert!(reply.embeds[0].fields.is_empty());
        assert_eq!(reply.buttons.len(), 3);
    }

    #[tokio::test]
    async fn per_user_log_requires_subject() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = AuditService::new(db)
            .render(&page(PageTag::KickAudit, 0, None), Utc::now())
            .await;

        assert!(matches!(result, Err(CommandError::MissingOption(_))));
    }

    #[tokio::test]
    async fn soft_ban_log_shows_days_and_time_left() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        SoftBanRepository::new(db)
            .create(CreateSoftBanParam {
                guild_id: 1,
                user_id: 2,
                actor_id: 3,
                reason: "raid".to_string(),
                days: 3,
            })
            .await
            .unwrap();

        let reply = AuditService::new(db)
            .render(&page(PageTag::SoftBanAudit, 0, Some(2)), Utc::now())
            .await
            .unwrap();

        let value = &reply.embeds[0].fields[0].value;
        assert!(value.contains("Amount of days: 3"));
        assert!(!value.contains("Over"));
    }

    #[tokio::test]
    async fn amount_counts_each_kind() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        warn(db, 2, "a").await;
        warn(db, 2, "b").await;

        let reply = AuditService::new(db)
            .amount(1, 2, &[ModerationKind::Warn, ModerationKind::Kick], "mod", Utc::now())
            .await
            .unwrap();

        let fields = &reply.embeds[0].fields;
        assert_eq!(fields[0].value, "This user has been warned 2 times in this server.");
        assert_eq!(fields[1].value, "This user has never been kicked in this server.");
    }

    #[tokio::test]
    async fn warn_by_id_is_scoped_to_guild() {
        let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let record = warn(db, 2, "spam").await;
        let service = AuditService::new(db);

        assert!(service.warn_by_id(1, record.id, "mod", Utc::now()).await.is_ok());
        assert!(matches!(
            service.warn_by_id(9, record.id, "mod", Utc::now()).await,
            Err(CommandError::NotFound(_))
        ));
    }
}
