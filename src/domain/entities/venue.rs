//! # Venue Entity
//!
//! A physical place where events are held.
//!
//! # Examples
//!
//! ```
//! use event_manager::domain::entities::venue::{Venue, VenueDetails};
//! use event_manager::domain::value_objects::VenueId;
//!
//! let details = VenueDetails::new("Main Hall", "Corvallis, OR", 250).unwrap();
//! let venue = Venue::new(VenueId::new(1), details);
//!
//! assert_eq!(venue.details.name(), "Main Hall");
//! assert_eq!(venue.details.capacity(), 250);
//! ```

use crate::domain::errors::{DomainError, DomainResult, require_text};
use crate::domain::value_objects::VenueId;
use serde::{Deserialize, Serialize};

/// The writable fields of a venue.
///
/// Updates overwrite every field at once; there is no partial patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueDetails {
    name: String,
    location: String,
    capacity: i32,
}

impl VenueDetails {
    /// Validates and builds venue fields.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::BlankField`] if the name or location is blank,
    /// or [`DomainError::NegativeCapacity`] if capacity is below zero.
    pub fn new(name: &str, location: &str, capacity: i32) -> DomainResult<Self> {
        let name = require_text("venueName", name)?;
        let location = require_text("location", location)?;
        if capacity < 0 {
            return Err(DomainError::NegativeCapacity(capacity));
        }
        Ok(Self {
            name,
            location,
            capacity,
        })
    }

    /// Venue name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form location (address, city, building).
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Maximum number of people the venue holds.
    #[must_use]
    pub fn capacity(&self) -> i32 {
        self.capacity
    }
}

/// A persisted venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Store-assigned identifier.
    pub id: VenueId,
    /// Current field values.
    pub details: VenueDetails,
}

impl Venue {
    /// Creates a venue from its identifier and fields.
    #[must_use]
    pub fn new(id: VenueId, details: VenueDetails) -> Self {
        Self { id, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_text_fields() {
        let details = VenueDetails::new("  Main Hall ", " Corvallis ", 10);
        assert_eq!(details.as_ref().map(VenueDetails::name).ok(), Some("Main Hall"));
        assert_eq!(
            details.as_ref().map(VenueDetails::location).ok(),
            Some("Corvallis")
        );
    }

    #[test]
    fn zero_capacity_is_allowed() {
        assert!(VenueDetails::new("Park", "Outdoors", 0).is_ok());
    }

    #[test]
    fn rejects_negative_capacity() {
        assert_eq!(
            VenueDetails::new("Park", "Outdoors", -1),
            Err(DomainError::NegativeCapacity(-1))
        );
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            VenueDetails::new(" ", "Outdoors", 5),
            Err(DomainError::blank("venueName"))
        );
    }
}
