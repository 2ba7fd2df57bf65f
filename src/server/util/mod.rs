//! Small helpers shared across the bot and web service.

pub mod parse;
pub mod time;
