//! Moderation domain models.
//!
//! Records are converted from entity models at the repository boundary so the command
//! and event layers never see SeaORM types.

use chrono::{DateTime, Utc};

/// The kind of moderation action taken against a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModerationKind {
    Warn,
    Kick,
    Ban,
    TimeOut,
    DeleteMessages,
    SoftBan,
}

impl ModerationKind {
    /// Stored and displayed name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Kick => "kick",
            Self::Ban => "ban",
            Self::TimeOut => "timeout",
            Self::DeleteMessages => "delete_messages",
            Self::SoftBan => "soft ban",
        }
    }

    /// Past tense used in audit and direct message embeds.
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Warn => "warned",
            Self::Kick => "kicked",
            Self::Ban => "banned",
            Self::TimeOut => "timed out",
            Self::DeleteMessages => "purged",
            Self::SoftBan => "soft banned",
        }
    }

    /// Title case label, e.g. `Time Out`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Warn => "Warn",
            Self::Kick => "Kick",
            Self::Ban => "Ban",
            Self::TimeOut => "Time Out",
            Self::DeleteMessages => "Delete Messages",
            Self::SoftBan => "Soft Ban",
        }
    }

    /// Parses a stored kind name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "warn" => Some(Self::Warn),
            "kick" => Some(Self::Kick),
            "ban" => Some(Self::Ban),
            "timeout" => Some(Self::TimeOut),
            "delete_messages" => Some(Self::DeleteMessages),
            "soft ban" => Some(Self::SoftBan),
            _ => None,
        }
    }
}

/// A warn, kick, ban, timeout or purge stored in `moderation_action`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationRecord {
    pub id: i32,
    pub kind: ModerationKind,
    pub guild_id: u64,
    pub user_id: u64,
    pub actor_id: u64,
    pub reason: String,
    /// End of a timeout, absent for every other kind.
    pub timeout_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ModerationRecord {
    /// Converts an entity model to a domain record.
    ///
    /// Rows with an unknown kind or non-numeric ids are rejected with `None` rather than
    /// surfacing half-populated records.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Some(ModerationRecord)` - The converted record
    /// - `None` - The row could not be interpreted
    pub fn from_entity(entity: entity::moderation_action::Model) -> Option<Self> {
        Some(Self {
            id: entity.id,
            kind: ModerationKind::from_name(&entity.kind)?,
            guild_id: entity.guild_id.parse().ok()?,
            user_id: entity.user_id.parse().ok()?,
            actor_id: entity.actor_id.parse().ok()?,
            reason: entity.reason,
            timeout_until: entity.timeout_until,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for recording a new moderation action.
#[derive(Debug, Clone)]
pub struct CreateModerationParam {
    pub kind: ModerationKind,
    pub guild_id: u64,
    pub user_id: u64,
    pub actor_id: u64,
    pub reason: String,
    pub timeout_until: Option<DateTime<Utc>>,
}

/// A soft ban that lifts itself after `days`.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftBanRecord {
    pub id: i32,
    pub guild_id: u64,
    pub user_id: u64,
    pub actor_id: u64,
    pub reason: String,
    pub days: i32,
    pub created_at: DateTime<Utc>,
}

impl SoftBanRecord {
    pub fn from_entity(entity: entity::soft_ban::Model) -> Option<Self> {
        Some(Self {
            id: entity.id,
            guild_id: entity.guild_id.parse().ok()?,
            user_id: entity.user_id.parse().ok()?,
            actor_id: entity.actor_id.parse().ok()?,
            reason: entity.reason,
            days: entity.days,
            created_at: entity.created_at,
        })
    }

    /// When the ban should be lifted.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + chrono::Duration::days(i64::from(self.days))
    }

    /// Whether the ban has run its course at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() <= now
    }
}

#[derive(Debug, Clone)]
pub struct CreateSoftBanParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub actor_id: u64,
    pub reason: String,
    pub days: i32,
}

/// An owner-initiated reload of the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReloadAuditRecord {
    pub id: i32,
    pub user_id: u64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl ReloadAuditRecord {
    pub fn from_entity(entity: entity::reload_audit::Model) -> Option<Self> {
        Some(Self {
            id: entity.id,
            user_id: entity.user_id.parse().ok()?,
            reason: entity.reason,
            created_at: entity.created_at,
        })
    }
}
