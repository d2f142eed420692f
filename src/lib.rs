//! Poseshenie - Telegram bot for physical education attendance
//!
//! Students register into a flow through a short conversation; admins mark
//! visits and the bot reports progress toward the required number of visits.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, input validation, phrase pool
//! - `storage`: SQLite pool, migrations and student queries
//! - `telegram`: bot setup, conversation state, replies and handlers

pub mod cli;
pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use self::core::{config, AppError, Settings};
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
pub use telegram::{schema, HandlerDeps};
