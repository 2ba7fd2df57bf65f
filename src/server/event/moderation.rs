//! Events published by moderation commands.

use crate::server::model::moderation::ModerationKind;

/// A moderation action that has already been carried out.
///
/// `subject_id` is absent for bulk message deletion. `action_id` is the id assigned by
/// the audit store, absent when nothing was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationActionEvent {
    pub kind: ModerationKind,
    pub guild_id: u64,
    pub actor_id: u64,
    pub subject_id: Option<u64>,
    pub reason: Option<String>,
    pub action_id: Option<i32>,
    pub soft_ban_days: Option<i32>,
    pub deleted_count: Option<u64>,
}

impl ModerationActionEvent {
    pub fn new(kind: ModerationKind, guild_id: u64, actor_id: u64) -> Self {
        Self {
            kind,
            guild_id,
            actor_id,
            subject_id: None,
            reason: None,
            action_id: None,
            soft_ban_days: None,
            deleted_count: None,
        }
    }

    pub fn subject(mut self, subject_id: u64) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn action_id(mut self, action_id: i32) -> Self {
        self.action_id = Some(action_id);
        self
    }

    pub fn soft_ban_days(mut self, days: i32) -> Self {
        self.soft_ban_days = Some(days);
        self
    }

    pub fn deleted_count(mut self, count: u64) -> Self {
        self.deleted_count = Some(count);
        self
    }
}
