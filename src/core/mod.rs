//! Core utilities, configuration, errors, and common functionality

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;
pub mod wishes;

// Re-exports for convenience
pub use config::Settings;
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_settings};
