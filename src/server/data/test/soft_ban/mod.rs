use crate::server::{
    data::soft_ban::SoftBanRepository, error::AppError, model::moderation::CreateSoftBanParam,
};
use test_utils::{builder::TestBuilder, factory::soft_ban::SoftBanFactory};

mod create;
mod delete;
mod get_all;
mod get_by_user;
