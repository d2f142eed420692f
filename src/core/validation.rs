//! Registration input validation
//!
//! - Full name: exactly three whitespace-separated tokens
//! - Flow: exact match against the configured flow names

use thiserror::Error;

/// Number of tokens in a full name: surname, given name, patronymic
pub const FULL_NAME_TOKENS: usize = 3;

/// Validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Name does not consist of exactly three tokens
    #[error("Expected {expected} name parts, got {actual}")]
    NameFormat { expected: usize, actual: usize },

    /// Text is not one of the configured flows
    #[error("Unknown flow '{0}'")]
    UnknownFlow(String),
}

/// Validates a full name and returns it normalized to single spaces.
///
/// Token content is not inspected, only the count.
///
/// # Examples
/// ```
/// use poseshenie::core::validation::validate_full_name;
///
/// assert_eq!(validate_full_name("  Иванов  Иван Иванович ").unwrap(), "Иванов Иван Иванович");
/// assert!(validate_full_name("Иванов Иван").is_err());
/// ```
pub fn validate_full_name(text: &str) -> Result<String, ValidationError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != FULL_NAME_TOKENS {
        return Err(ValidationError::NameFormat {
            expected: FULL_NAME_TOKENS,
            actual: parts.len(),
        });
    }
    Ok(parts.join(" "))
}

/// Checks that `text` is exactly one of `flows` (case-sensitive, no trimming).
pub fn validate_flow<'a>(text: &str, flows: &'a [String]) -> Result<&'a str, ValidationError> {
    flows
        .iter()
        .find(|flow| flow.as_str() == text)
        .map(String::as_str)
        .ok_or_else(|| ValidationError::UnknownFlow(text.to_string()))
}
