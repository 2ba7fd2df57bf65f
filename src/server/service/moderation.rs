//! Moderation bookkeeping.
//!
//! Commands perform the Discord side of an action themselves and then hand the outcome
//! to `ModerationService`, which stores the audit record and publishes a
//! `ModerationActionEvent`. Publishing is best effort: a failing audit listener is logged
//! and never turns a completed action into a failed command.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{moderation_action::ModerationActionRepository, soft_ban::SoftBanRepository},
    error::command::CommandError,
    event::{moderation::ModerationActionEvent, EventBus},
    model::moderation::{
        CreateModerationParam, CreateSoftBanParam, ModerationKind, ModerationRecord,
        SoftBanRecord,
    },
};

pub struct ModerationService<'a> {
    db: &'a DatabaseConnection,
    events: &'a EventBus,
}

impl<'a> ModerationService<'a> {
    pub fn new(db: &'a DatabaseConnection, events: &'a EventBus) -> Self {
        Self { db, events }
    }

    /// Records a warn, kick, ban or timeout and announces it.
    ///
    /// # Returns
    /// - `Ok(ModerationRecord)` - The stored record
    /// - `Err(CommandError::Database)` - The record could not be stored; nothing was published
    pub async fn record(
        &self,
        param: CreateModerationParam,
    ) -> Result<ModerationRecord, CommandError> {
        let record = ModerationActionRepository::new(self.db).create(param).await?;

        let event = ModerationActionEvent::new(record.kind, record.guild_id, record.actor_id)
            .subject(record.user_id)
            .reason(record.reason.clone())
            .action_id(record.id);
        self.publish(&event).await;

        Ok(record)
    }

    /// Records a soft ban and announces it with its duration.
    pub async fn record_soft_ban(
        &self,
        param: CreateSoftBanParam,
    ) -> Result<SoftBanRecord, CommandError> {
        let record = SoftBanRepository::new(self.db).create(param).await?;

        let event =
            ModerationActionEvent::new(ModerationKind::SoftBan, record.guild_id, record.actor_id)
                .subject(record.user_id)
                .reason(record.reason.clone())
                .action_id(record.id)
                .soft_ban_days(record.days);
        self.publish(&event).await;

        Ok(record)
    }

    /// Announces a bulk delete. Purges are not stored.
    pub async fn record_purge(
        &self,
        guild_id: u64,
        actor_id: u64,
        deleted: u64,
        reason: Option<&str>,
    ) {
        let mut event =
            ModerationActionEvent::new(ModerationKind::DeleteMessages, guild_id, actor_id)
                .deleted_count(deleted);
        if let Some(reason) = reason {
            event = event.reason(reason);
        }
        self.publish(&event).await;
    }

    async fn publish(&self, event: &ModerationActionEvent) {
        if let Err(e) = self.events.publish(event).await {
            tracing::error!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use test_utils::builder::TestBuilder;

    use super::*;
    use crate::server::{error::event::HandlerError, event::Subscriber};

    struct Capture(Arc<Mutex<Vec<ModerationActionEvent>>>);

    #[async_trait]
    impl Subscriber<ModerationActionEvent> for Capture {
        async fn handle(&self, event: &ModerationActionEvent) -> Result<(), HandlerError> {
            self.0.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct Broken;

    #[async_trait]
    impl Subscriber<ModerationActionEvent> for Broken {
        async fn handle(&self, _event: &ModerationActionEvent) -> Result<(), HandlerError> {
            Err("audit channel gone".into())
        }
    }

    #[tokio::test]
    async fn record_publishes_event_with_action_id() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::ModerationAction)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let captured = Arc::new(Mutex::new(Vec::new()));
        let mut events = EventBus::new();
        events.subscribe::<ModerationActionEvent, _>(Capture(captured.clone()));

        let record = ModerationService::new(db, &events)
            .record(CreateModerationParam {
                kind: ModerationKind::Kick,
                guild_id: 1,
                user_id: 2,
                actor_id: 3,
                reason: "Rude".to_string(),
                timeout_until: None,
            })
            .await
            .unwrap();

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].kind, ModerationKind::Kick);
        assert_eq!(captured[0].subject_id, Some(2));
        assert_eq!(captured[0].action_id, Some(record.id));
    }

    #[tokio::test]
    async fn soft_ban_event_carries_days() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::SoftBan)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let captured = Arc::new(Mutex::new(Vec::new()));
        let mut events = EventBus::new();
        events.subscribe::<ModerationActionEvent, _>(Capture(captured.clone()));

        ModerationService::new(db, &events)
            .record_soft_ban(CreateSoftBanParam {
                guild_id: 1,
                user_id: 2,
                actor_id: 3,
                reason: "Raid".to_string(),
                days: 3,
            })
            .await
            .unwrap();

        assert_eq!(captured.lock().unwrap()[0].soft_ban_days, Some(3));
    }

    #[tokio::test]
    async fn listener_failure_does_not_fail_the_action() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::ModerationAction)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mut events = EventBus::new();
        events.subscribe::<ModerationActionEvent, _>(Broken);

        let result = ModerationService::new(db, &events)
            .record(CreateModerationParam {
                kind: ModerationKind::Warn,
                guild_id: 1,
                user_id: 2,
                actor_id: 3,
                reason: "Spam".to_string(),
                timeout_until: None,
            })
            .await;

        assert!(result.is_ok());
    }
}
