use crate::server::{
    data::moderation_action::ModerationActionRepository,
    error::AppError,
    model::moderation::{CreateModerationParam, ModerationKind},
};
use test_utils::{builder::TestBuilder, factory::moderation_action::ModerationActionFactory};

mod count_by_user;
mod create;
mod find_by_id;
mod get_by_user;
