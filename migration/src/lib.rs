pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_moderation_action_table;
mod m20260105_000002_create_soft_ban_table;
mod m20260105_000003_create_reload_audit_table;
mod m20260105_000004_create_audit_channel_table;
mod m20260106_000005_create_oauth_user_table;
mod m20260112_000006_create_apprenticeship_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_moderation_action_table::Migration),
            Box::new(m20260105_000002_create_soft_ban_table::Migration),
            Box::new(m20260105_000003_create_reload_audit_table::Migration),
            Box::new(m20260105_000004_create_audit_channel_table::Migration),
            Box::new(m20260106_000005_create_oauth_user_table::Migration),
            Box::new(m20260112_000006_create_apprenticeship_table::Migration),
        ]
    }
}
