use crate::server::{data::reload_audit::ReloadAuditRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory::create_reload_audit};

mod create;
mod get_all;
