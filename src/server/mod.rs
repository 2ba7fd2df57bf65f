//! Bot backend: Discord gateway handling, web API, persistence and scheduled jobs.
//!
//! # Architecture
//!
//! - **Bot** (`bot/`) - Slash command catalog, router, button handling and replies
//! - **Events** (`event/`) - Typed event bus and the moderation audit listener
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Moderation records, audit pages, the apprenticeship
//!   sync, soft ban expiry and OAuth login
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers and the login guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared web state (DB, HTTP and OAuth clients)
//! - **Startup** (`startup`) - Logging, database, session and client initialisation
//! - **Router** (`router`) - Axum route configuration
//! - **Scheduler** (`scheduler/`) - Hourly apprenticeship sync and soft ban expiry

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod event;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
