use sea_orm::entity::prelude::*;

/// A single warn, kick, ban, timeout or message purge recorded by the bot.
///
/// `kind` holds the lowercase moderation type name (`warn`, `kick`, `ban`,
/// `timeout`, `delete_messages`). `timeout_until` is only populated for timeouts.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "moderation_action")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kind: String,
    pub guild_id: String,
    pub user_id: String,
    pub actor_id: String,
    pub reason: String,
    pub timeout_until: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
