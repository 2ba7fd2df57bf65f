mod apprenticeship;
mod audit_channel;
mod moderation_action;
mod oauth_user;
mod reload_audit;
mod soft_ban;
