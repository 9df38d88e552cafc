//! # Registration Key
//!
//! Composite key of the Event↔Attendee association.

use crate::domain::value_objects::ids::{AttendeeId, EventId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The (event, attendee) pair identifying one registration.
///
/// A registration has no identity of its own; two keys with the same
/// event and attendee denote the same row.
///
/// # Examples
///
/// ```
/// use event_manager::domain::value_objects::{AttendeeId, EventId, RegistrationKey};
///
/// let key = RegistrationKey::new(EventId::new(1), AttendeeId::new(7));
/// assert_eq!(key.to_string(), "event 1 / attendee 7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegistrationKey {
    /// The event side of the pair.
    #[serde(rename = "eventID")]
    pub event_id: EventId,
    /// The attendee side of the pair.
    #[serde(rename = "attendeeID")]
    pub attendee_id: AttendeeId,
}

impl RegistrationKey {
    /// Creates a key from its two halves.
    #[must_use]
    pub const fn new(event_id: EventId, attendee_id: AttendeeId) -> Self {
        Self {
            event_id,
            attendee_id,
        }
    }
}

impl fmt::Display for RegistrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event {} / attendee {}", self.event_id, self.attendee_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_original_field_names() {
        let key: RegistrationKey =
            serde_json::from_str(r#"{"eventID": 1, "attendeeID": 7}"#).unwrap();
        assert_eq!(key, RegistrationKey::new(EventId::new(1), AttendeeId::new(7)));
    }

    #[test]
    fn equal_pairs_are_equal_keys() {
        let a = RegistrationKey::new(EventId::new(2), AttendeeId::new(3));
        let b = RegistrationKey::new(EventId::new(2), AttendeeId::new(3));
        let c = RegistrationKey::new(EventId::new(3), AttendeeId::new(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
