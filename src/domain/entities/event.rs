//! # Event Entity
//!
//! A dated happening hosted at exactly one venue.

use crate::domain::errors::{DomainResult, require_text};
use crate::domain::value_objects::{EventId, VenueId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The writable fields of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    name: String,
    date: NaiveDate,
    description: String,
    venue_id: VenueId,
}

impl EventDetails {
    /// Validates and builds event fields.
    ///
    /// The description may be empty. Whether `venue_id` refers to an
    /// existing venue is decided by the store.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::BlankField`](crate::domain::errors::DomainError::BlankField)
    /// if the name is blank.
    pub fn new(
        name: &str,
        date: NaiveDate,
        description: &str,
        venue_id: VenueId,
    ) -> DomainResult<Self> {
        Ok(Self {
            name: require_text("eventName", name)?,
            date,
            description: description.trim().to_string(),
            venue_id,
        })
    }

    /// Event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calendar date of the event.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Free-form description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Hosting venue.
    #[must_use]
    pub fn venue_id(&self) -> VenueId {
        self.venue_id
    }
}

/// A persisted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Current field values.
    pub details: EventDetails,
}

impl Event {
    /// Creates an event from its identifier and fields.
    #[must_use]
    pub fn new(id: EventId, details: EventDetails) -> Self {
        Self { id, details }
    }
}

/// An event joined with the venue that hosts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListing {
    /// The event itself.
    pub event: Event,
    /// Name of the hosting venue.
    pub venue_name: String,
    /// Location of the hosting venue.
    pub location: String,
    /// Capacity of the hosting venue.
    pub capacity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 17).unwrap_or_default()
    }

    #[test]
    fn empty_description_is_allowed() {
        let details = EventDetails::new("Launch Party", date(), "", VenueId::new(1));
        assert_eq!(details.map(|d| d.description().to_string()), Ok(String::new()));
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            EventDetails::new("\t", date(), "x", VenueId::new(1)),
            Err(DomainError::blank("eventName"))
        );
    }
}
