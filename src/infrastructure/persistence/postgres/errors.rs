//! # PostgreSQL Error Mapping
//!
//! Classifies `sqlx` errors into [`RepositoryError`]s.
//!
//! Constraint violations are reported by name so that each repository can
//! decide what a violation means for the statement it ran: the same
//! `events_venue_fk` is a missing reference on insert and a still
//! referenced row on delete.

use crate::infrastructure::persistence::traits::RepositoryError;
use sqlx::error::ErrorKind;

/// `event_attendees` primary key.
pub(crate) const REGISTRATION_PKEY: &str = "event_attendees_pkey";
/// `event_attendees.event_id` foreign key.
pub(crate) const REGISTRATION_EVENT_FK: &str = "event_attendees_event_fk";
/// `event_attendees.attendee_id` foreign key.
pub(crate) const REGISTRATION_ATTENDEE_FK: &str = "event_attendees_attendee_fk";
/// `events.venue_id` foreign key.
pub(crate) const EVENT_VENUE_FK: &str = "events_venue_fk";
/// `speakers.event_id` foreign key.
pub(crate) const SPEAKER_EVENT_FK: &str = "speakers_event_fk";

/// An integrity constraint the database refused a statement for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Violation {
    /// Unique or primary key constraint, by name.
    Unique(String),
    /// Foreign key constraint, by name.
    ForeignKey(String),
}

impl Violation {
    /// Returns true if this violates the named constraint.
    pub(crate) fn is(&self, constraint: &str) -> bool {
        match self {
            Self::Unique(name) | Self::ForeignKey(name) => name == constraint,
        }
    }
}

/// Extracts the violated constraint, if `err` is an integrity violation.
pub(crate) fn violation(err: &sqlx::Error) -> Option<Violation> {
    let db = err.as_database_error()?;
    let constraint = db.constraint().unwrap_or_default().to_string();
    match db.kind() {
        ErrorKind::UniqueViolation => Some(Violation::Unique(constraint)),
        ErrorKind::ForeignKeyViolation => Some(Violation::ForeignKey(constraint)),
        _ => None,
    }
}

/// Maps an unexpected `sqlx` error to a connection or query failure.
pub(crate) fn store_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => RepositoryError::connection(err.to_string()),
        other => RepositoryError::query(other.to_string()),
    }
}
