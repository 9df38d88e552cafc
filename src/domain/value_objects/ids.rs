//! # Identifiers
//!
//! Store-assigned integer identifiers for every persisted entity.
//!
//! Each entity gets its own newtype so an [`EventId`] can never be passed
//! where an [`AttendeeId`] is expected.
//!
//! # Examples
//!
//! ```
//! use event_manager::domain::value_objects::{AttendeeId, EventId};
//!
//! let event = EventId::new(1);
//! let attendee = AttendeeId::new(7);
//!
//! assert_eq!(event.get(), 1);
//! assert_eq!(attendee.to_string(), "7");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw store identifier.
            #[inline]
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw store identifier.
            #[inline]
            #[must_use]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Venue`](crate::domain::entities::Venue).
    VenueId
);

define_id!(
    /// Identifier of an [`Event`](crate::domain::entities::Event).
    EventId
);

define_id!(
    /// Identifier of a [`Speaker`](crate::domain::entities::Speaker).
    SpeakerId
);

define_id!(
    /// Identifier of an [`Attendee`](crate::domain::entities::Attendee).
    AttendeeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_value() {
        assert_eq!(VenueId::new(42).to_string(), "42");
        assert_eq!(SpeakerId::from(3).get(), 3);
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&EventId::new(9)).unwrap_or_default();
        assert_eq!(json, "9");

        let id: AttendeeId = serde_json::from_str("12").unwrap_or(AttendeeId::new(0));
        assert_eq!(id, AttendeeId::new(12));
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(EventId::new(1) < EventId::new(2));
    }
}
