//! Telegram bot integration and handlers

pub mod bot;
pub mod cleanup;
pub mod conversation;
pub mod handlers;
pub mod keyboards;
pub mod replies;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use conversation::Conversations;
pub use handlers::{schema, HandlerDeps, HandlerError};
