use crate::server::{data::audit_channel::AuditChannelRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory::create_audit_channel};

mod get;
mod set_if_absent;
mod upsert;
