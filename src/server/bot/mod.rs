//! Discord bot integration.
//!
//! The bot answers slash commands and audit page buttons. Commands are collected in a
//! static catalog, registered with Discord when the gateway reports ready, and routed
//! through a `CommandRouter` that enforces the owner gate. Moderation commands publish
//! events that the audit listener mirrors into each guild's audit channel.
//!
//! The bot runs in its own tokio task next to the web service and the scheduler. Its
//! REST client is shared through `BotContext` so background jobs can post without a
//! gateway connection of their own.
//!
//! # Gateway Intents
//!
//! Only `GUILDS` is requested. Interactions are delivered without any intent and no
//! message content is read.

pub mod command;
pub mod context;
pub mod handler;
pub mod pagination;
pub mod reply;
pub mod start;
