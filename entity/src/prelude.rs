pub use super::apprenticeship::Entity as Apprenticeship;
pub use super::audit_channel::Entity as AuditChannel;
pub use super::moderation_action::Entity as ModerationAction;
pub use super::oauth_user::Entity as OauthUser;
pub use super::reload_audit::Entity as ReloadAudit;
pub use super::soft_ban::Entity as SoftBan;
