//! # Domain Errors
//!
//! Validation failures raised while building entities from caller input.

use thiserror::Error;

/// Error raised when entity fields violate a domain rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required text field is empty or whitespace only.
    #[error("{field} must not be blank")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Venue capacity below zero.
    #[error("capacity must be non-negative, got {0}")]
    NegativeCapacity(i32),

    /// Malformed email address.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
}

impl DomainError {
    /// Creates a blank field error.
    #[must_use]
    pub fn blank(field: &'static str) -> Self {
        Self::BlankField { field }
    }

    /// Creates an invalid email error.
    #[must_use]
    pub fn invalid_email(raw: impl Into<String>) -> Self {
        Self::InvalidEmail(raw.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Trims `value` and rejects it when nothing is left.
///
/// # Errors
///
/// Returns [`DomainError::BlankField`] naming `field` if `value` is blank.
pub fn require_text(field: &'static str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DomainError::blank(field))
    } else {
        Ok(trimmed.to_string())
    }
}
