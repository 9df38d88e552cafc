//! # Registration Stage
//!
//! Linear processing stages of a registration request.
//!
//! # State Machine
//!
//! ```text
//! CheckingEvent → CheckingAttendee → CheckingDuplicate → Writing → Confirming
//! ```
//!
//! Each check may end the request with a rejection; no stage can be
//! skipped or revisited.
//!
//! # Examples
//!
//! ```
//! use event_manager::domain::value_objects::RegistrationStage;
//!
//! let stage = RegistrationStage::CheckingEvent;
//! assert!(stage.can_transition_to(RegistrationStage::CheckingAttendee));
//! assert!(!stage.can_transition_to(RegistrationStage::Writing));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum RegistrationStage {
    /// Looking up the referenced event.
    #[default]
    CheckingEvent = 0,

    /// Looking up the referenced attendee.
    CheckingAttendee = 1,

    /// Looking for an existing row with the same pair.
    CheckingDuplicate = 2,

    /// Inserting the association row.
    Writing = 3,

    /// Re-reading the inserted row with its joined details (terminal).
    Confirming = 4,
}

impl RegistrationStage {
    /// Returns true if this is the final stage.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirming)
    }

    /// Returns true if the store has not been mutated yet in this stage.
    #[inline]
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::CheckingEvent | Self::CheckingAttendee | Self::CheckingDuplicate
        )
    }

    /// Returns the stage that follows this one, if any.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::CheckingEvent => Some(Self::CheckingAttendee),
            Self::CheckingAttendee => Some(Self::CheckingDuplicate),
            Self::CheckingDuplicate => Some(Self::Writing),
            Self::Writing => Some(Self::Confirming),
            Self::Confirming => None,
        }
    }

    /// Returns true if `target` directly follows this stage.
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Returns the numeric value of this stage.
    #[inline]
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CheckingEvent => "checking-event",
            Self::CheckingAttendee => "checking-attendee",
            Self::CheckingDuplicate => "checking-duplicate",
            Self::Writing => "writing",
            Self::Confirming => "confirming",
        };
        f.write_str(s)
    }
}
