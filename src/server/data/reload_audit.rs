//! Reload audit repository.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::server::{data::invalid_row, model::moderation::ReloadAuditRecord};

pub struct ReloadAuditRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReloadAuditRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records that `user_id` reloaded the bot.
    ///
    /// # Arguments
    /// - `user_id` - Discord id of the owner
    /// - `reason` - Reason given to the `reload` command
    pub async fn create(&self, user_id: u64, reason: &str) -> Result<ReloadAuditRecord, DbErr> {
        let entity = entity::reload_audit::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            reason: ActiveValue::Set(reason.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let id = entity.id;
        ReloadAuditRecord::from_entity(entity).ok_or_else(|| invalid_row("reload_audit", id))
    }

    /// Gets every reload, newest first.
    pub async fn get_all(&self) -> Result<Vec<ReloadAuditRecord>, DbErr> {
        let entities = entity::prelude::ReloadAudit::find()
            .order_by_desc(entity::reload_audit::Column::CreatedAt)
            .order_by_desc(entity::reload_audit::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .filter_map(ReloadAuditRecord::from_entity)
            .collect())
    }
}
