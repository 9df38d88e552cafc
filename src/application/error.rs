//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures that can occur during use case execution,
//! including validation failures, rejected registrations, and store errors.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                 - Field validation failures
//! ├── Infrastructure(InfrastructureError) - Store and configuration failures
//! ├── Rejected(RegistrationRejection)     - Expected registration refusals
//! ├── NotFound                            - Addressed row does not exist
//! ├── MissingReference                    - Written row points at nothing
//! └── InUse                               - Deleted row is still referenced
//! ```
//!
//! # Examples
//!
//! ```
//! use event_manager::application::error::{ApplicationError, InfrastructureError};
//!
//! let err = ApplicationError::not_found("Venue", 4);
//! assert!(err.is_not_found());
//!
//! let infra_err = InfrastructureError::database("connection reset");
//! let app_err: ApplicationError = infra_err.into();
//! assert!(app_err.is_store_failure());
//! ```

use crate::domain::entities::RegistrationRejection;
use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Infrastructure layer error.
///
/// Represents errors from the database and the process environment.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Database error.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// HTTP listener error.
    #[error("server error: {0}")]
    Server(String),
}

impl InfrastructureError {
    /// Creates a database error.
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a server error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Field validation failed.
    #[error("validation error: {0}")]
    Domain(#[from] DomainError),

    /// Infrastructure error from external systems.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Registration refused for an expected reason.
    #[error("registration rejected: {}", .0.message())]
    Rejected(RegistrationRejection),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// A written row references a resource that does not exist.
    #[error("missing reference: {resource_type} with id {id} does not exist")]
    MissingReference {
        /// Type of the referenced resource.
        resource_type: String,
        /// Referenced identifier.
        id: String,
    },

    /// A resource cannot be deleted while other rows reference it.
    #[error("in use: {resource_type} with id {id} is still referenced")]
    InUse {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },
}

impl ApplicationError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a rejected registration error.
    #[must_use]
    pub fn rejected(rejection: RegistrationRejection) -> Self {
        Self::Rejected(rejection)
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Returns the rejection classification, if this is one.
    #[must_use]
    pub fn rejection(&self) -> Option<RegistrationRejection> {
        match self {
            Self::Rejected(rejection) => Some(*rejection),
            _ => None,
        }
    }

    /// Returns true for unexpected store or environment failures.
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Infrastructure(_))
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity_type, id } => Self::NotFound {
                resource_type: entity_type.to_string(),
                id,
            },
            RepositoryError::MissingReference { entity_type, id } => Self::MissingReference {
                resource_type: entity_type.to_string(),
                id,
            },
            RepositoryError::StillReferenced { entity_type, id } => Self::InUse {
                resource_type: entity_type.to_string(),
                id,
            },
            other => Self::Infrastructure(InfrastructureError::Repository(other)),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    // InfrastructureError tests

    #[test]
    fn infrastructure_error_database() {
        let err = InfrastructureError::database("connection timeout");
        assert!(err.to_string().contains("database"));
        assert!(err.to_string().contains("connection timeout"));
    }

    #[test]
    fn infrastructure_error_configuration() {
        let err = InfrastructureError::configuration("missing url");
        assert!(err.to_string().contains("configuration"));
    }

    #[test]
    fn infrastructure_error_from_repository_error() {
        let repo_err = RepositoryError::query("relation does not exist");
        let infra_err: InfrastructureError = repo_err.into();
        assert!(infra_err.to_string().contains("relation does not exist"));
    }

    // ApplicationError tests

    #[test]
    fn application_error_not_found() {
        let err = ApplicationError::not_found("Event", 3);
        assert!(err.to_string().contains("Event"));
        assert!(err.to_string().contains('3'));
        assert!(err.is_not_found());
    }

    #[test]
    fn application_error_rejected_carries_message() {
        let err = ApplicationError::rejected(RegistrationRejection::InvalidAttendee);
        assert!(err.to_string().contains("Attendee does not exist"));
        assert_eq!(err.rejection(), Some(RegistrationRejection::InvalidAttendee));
    }

    #[test]
    fn application_error_from_domain_error() {
        let err: ApplicationError = DomainError::blank("eventName").into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("eventName"));
    }

    #[test]
    fn repository_not_found_maps_to_not_found() {
        let err: ApplicationError = RepositoryError::not_found("Speaker", 2).into();
        assert!(err.is_not_found());
    }

    #[test]
    fn repository_missing_reference_maps_through() {
        let err: ApplicationError = RepositoryError::missing_reference("Venue", 8).into();
        assert!(matches!(
            err,
            ApplicationError::MissingReference { ref resource_type, .. } if resource_type == "Venue"
        ));
    }

    #[test]
    fn repository_still_referenced_maps_to_in_use() {
        let err: ApplicationError = RepositoryError::still_referenced("Venue", 8).into();
        assert!(matches!(err, ApplicationError::InUse { .. }));
    }

    #[test]
    fn repository_failures_are_store_failures() {
        let err: ApplicationError = RepositoryError::connection("refused").into();
        assert!(err.is_store_failure());
        assert!(err.to_string().contains("refused"));
    }
}
