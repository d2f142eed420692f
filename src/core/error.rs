use thiserror::Error;

/// Centralized error types for the application
///
/// Modeled outcomes (duplicate registration, unknown student, invalid input)
/// are plain return values; everything here is unexpected infrastructure failure.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database connection pool errors
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] r2d2::Error),

    /// Schema migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] refinery::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
