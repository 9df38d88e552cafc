//! # Speaker Entity
//!
//! A presenter, optionally assigned to one event.

use crate::domain::errors::{DomainResult, require_text};
use crate::domain::value_objects::{EventId, SpeakerId};
use serde::{Deserialize, Serialize};

/// The writable fields of a speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerDetails {
    first_name: String,
    last_name: String,
    specialization: String,
    event_id: Option<EventId>,
}

impl SpeakerDetails {
    /// Validates and builds speaker fields.
    ///
    /// `event_id` of `None` leaves the speaker unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::BlankField`](crate::domain::errors::DomainError::BlankField)
    /// if either name is blank.
    pub fn new(
        first_name: &str,
        last_name: &str,
        specialization: &str,
        event_id: Option<EventId>,
    ) -> DomainResult<Self> {
        Ok(Self {
            first_name: require_text("fName", first_name)?,
            last_name: require_text("lName", last_name)?,
            specialization: specialization.trim().to_string(),
            event_id,
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

    /// Topic area, possibly empty.
    #[must_use]
    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    /// Assigned event, if any.
    #[must_use]
    pub fn event_id(&self) -> Option<EventId> {
        self.event_id
    }

    /// Returns a copy with the event assignment cleared.
    #[must_use]
    pub fn unassigned(mut self) -> Self {
        self.event_id = None;
        self
    }
}

/// A persisted speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// Store-assigned identifier.
    pub id: SpeakerId,
    /// Current field values.
    pub details: SpeakerDetails,
}

impl Speaker {
    /// Creates a speaker from its identifier and fields.
    #[must_use]
    pub fn new(id: SpeakerId, details: SpeakerDetails) -> Self {
        Self { id, details }
    }
}

/// A speaker joined with the name and date of its event, when assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerListing {
    /// The speaker itself.
    pub speaker: Speaker,
    /// Name of the assigned event.
    pub event_name: Option<String>,
    /// Date of the assigned event.
    pub event_date: Option<chrono::NaiveDate>,
}
