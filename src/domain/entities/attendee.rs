//! # Attendee Entity
//!
//! A person who may register for events.

use crate::domain::errors::{DomainResult, require_text};
use crate::domain::value_objects::{AttendeeId, Email};
use serde::{Deserialize, Serialize};

/// The writable fields of an attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeDetails {
    first_name: String,
    last_name: String,
    email: Email,
}

impl AttendeeDetails {
    /// Validates and builds attendee fields.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`](crate::domain::errors::DomainError) if a
    /// name is blank or the email is malformed.
    pub fn new(first_name: &str, last_name: &str, email: &str) -> DomainResult<Self> {
        Ok(Self {
            first_name: require_text("fName", first_name)?,
            last_name: require_text("lName", last_name)?,
            email: Email::parse(email)?,
        })
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Contact address.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Display name, `"{first} {last}"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use event_manager::domain::entities::AttendeeDetails;
    ///
    /// let details = AttendeeDetails::new("A.", "Lee", "a.lee@example.com").unwrap();
    /// assert_eq!(details.full_name(), "A. Lee");
    /// ```
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A persisted attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Store-assigned identifier.
    pub id: AttendeeId,
    /// Current field values.
    pub details: AttendeeDetails,
}

impl Attendee {
    /// Creates an attendee from its identifier and fields.
    #[must_use]
    pub fn new(id: AttendeeId, details: AttendeeDetails) -> Self {
        Self { id, details }
    }
}
