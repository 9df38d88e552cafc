//! # Email Value Object
//!
//! A lightly validated email address.
//!
//! Validation is structural only: exactly one `@`, a non-empty local part,
//! a non-empty domain, and no whitespace. Deliverability is not checked.
//!
//! # Examples
//!
//! ```
//! use event_manager::domain::value_objects::Email;
//!
//! let email = Email::parse("a.lee@example.com").unwrap();
//! assert_eq!(email.as_str(), "a.lee@example.com");
//!
//! assert!(Email::parse("not-an-email").is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An email address that passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parses and validates an email address.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEmail`] if the address is malformed.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        let mut parts = trimmed.split('@');
        let valid = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !trimmed.chars().any(char::is_whitespace)
            }
            _ => false,
        };

        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(DomainError::invalid_email(raw))
        }
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
