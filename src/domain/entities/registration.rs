//! # Registration Entity
//!
//! The Event↔Attendee association and the reasons a new one can be refused.
//!
//! A registration row carries no data beyond its [`RegistrationKey`]; the
//! read model [`RegistrationDetail`] joins it with the event and attendee it
//! references.

use crate::domain::value_objects::{AttendeeId, EventId, RegistrationKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registration joined with its event and attendee.
///
/// Returned as confirmation after a successful write and by all
/// registration listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDetail {
    /// Registered event.
    pub event_id: EventId,
    /// Name of the registered event.
    pub event_name: String,
    /// Date of the registered event.
    pub event_date: NaiveDate,
    /// Registered attendee.
    pub attendee_id: AttendeeId,
    /// Attendee given name.
    pub first_name: String,
    /// Attendee family name.
    pub last_name: String,
    /// Attendee email address.
    pub email: String,
}

impl RegistrationDetail {
    /// Returns the composite key of this registration.
    #[must_use]
    pub fn key(&self) -> RegistrationKey {
        RegistrationKey::new(self.event_id, self.attendee_id)
    }

    /// Attendee display name, `"{first} {last}"`.
    #[must_use]
    pub fn attendee_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Expected reason for refusing a registration write.
///
/// Each variant has a stable machine-readable [`code`](Self::code) that
/// clients switch on to render a distinct message.
///
/// # Examples
///
/// ```
/// use event_manager::domain::entities::RegistrationRejection;
///
/// let rejection = RegistrationRejection::DuplicateRegistration;
/// assert_eq!(rejection.code(), "DUPLICATE_REGISTRATION");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationRejection {
    /// The referenced event does not exist.
    InvalidEvent,
    /// The referenced attendee does not exist.
    InvalidAttendee,
    /// The pair is already registered.
    DuplicateRegistration,
}

impl RegistrationRejection {
    /// Machine-readable classification.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidEvent => "INVALID_EVENT",
            Self::InvalidAttendee => "INVALID_ATTENDEE",
            Self::DuplicateRegistration => "DUPLICATE_REGISTRATION",
        }
    }

    /// Human-readable explanation.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidEvent => "Invalid event ID: Event does not exist",
            Self::InvalidAttendee => "Invalid attendee ID: Attendee does not exist",
            Self::DuplicateRegistration => "Attendee is already registered for this event",
        }
    }
}

impl fmt::Display for RegistrationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> RegistrationDetail {
        RegistrationDetail {
            event_id: EventId::new(1),
            event_name: "Launch Party".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
            attendee_id: AttendeeId::new(7),
            first_name: "A.".to_string(),
            last_name: "Lee".to_string(),
            email: "a.lee@example.com".to_string(),
        }
    }

    #[test]
    fn attendee_name_joins_first_and_last() {
        assert_eq!(detail().attendee_name(), "A. Lee");
    }

    #[test]
    fn key_matches_ids() {
        assert_eq!(
            detail().key(),
            RegistrationKey::new(EventId::new(1), AttendeeId::new(7))
        );
    }

    #[test]
    fn codes_match_serde_names() {
        for rejection in [
            RegistrationRejection::InvalidEvent,
            RegistrationRejection::InvalidAttendee,
            RegistrationRejection::DuplicateRegistration,
        ] {
            let json = serde_json::to_string(&rejection).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", rejection.code()));
        }
    }
}
