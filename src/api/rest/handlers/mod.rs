//! # REST Handlers
//!
//! Request handlers, shared state, and the error-to-response mapping.
//!
//! Every handler returns `Result<_, ApiError>`; [`ApiError`] turns an
//! [`ApplicationError`] into a status code and an [`ErrorResponse`] body:
//!
//! | Error | Status | `error` |
//! |---|---|---|
//! | rejected registration | 400 | `INVALID_EVENT`, `INVALID_ATTENDEE`, `DUPLICATE_REGISTRATION` |
//! | missing reference | 400 | `INVALID_VENUE`, `INVALID_EVENT`, ... |
//! | validation | 400 | `VALIDATION_ERROR` |
//! | not found | 404 | `NOT_FOUND` |
//! | still referenced | 409 | `VENUE_IN_USE`, ... |
//! | store failure | 500 | `STORE_ERROR` |

pub mod attendees;
pub mod events;
pub mod health;
pub mod registrations;
pub mod speakers;
pub mod venues;

use crate::application::error::ApplicationError;
use crate::application::services::{CatalogService, RegistrationService};
use crate::infrastructure::persistence::{Repositories, StoreProbe};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Validated registrations.
    pub registrations: RegistrationService,
    /// Venue, event, speaker and attendee CRUD.
    pub catalog: CatalogService,
    /// Store round trip for diagnostics.
    pub probe: Arc<dyn StoreProbe>,
}

impl AppState {
    /// Builds the state over the repositories of one store.
    #[must_use]
    pub fn new(repositories: Repositories) -> Self {
        Self {
            registrations: RegistrationService::from_repositories(&repositories),
            probe: Arc::clone(&repositories.probe),
            catalog: CatalogService::new(repositories),
        }
    }
}

/// Error body returned by every failing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub message: String,
    /// Machine-readable classification.
    pub error: String,
    /// Underlying store message, for store failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Body of responses that only confirm an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Creates a confirmation body.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Handler error, rendered as an [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError(ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and body for this error.
    #[must_use]
    pub fn parts(&self) -> (StatusCode, ErrorResponse) {
        let (status, message, error, detail) = match &self.0 {
            ApplicationError::Rejected(rejection) => (
                StatusCode::BAD_REQUEST,
                rejection.message().to_string(),
                rejection.code().to_string(),
                None,
            ),
            ApplicationError::Domain(err) => (
                StatusCode::BAD_REQUEST,
                err.to_string(),
                "VALIDATION_ERROR".to_string(),
                None,
            ),
            ApplicationError::MissingReference { resource_type, .. } => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Invalid {} ID: {resource_type} does not exist",
                    resource_type.to_lowercase()
                ),
                format!("INVALID_{}", resource_type.to_uppercase()),
                None,
            ),
            ApplicationError::NotFound { resource_type, .. } => (
                StatusCode::NOT_FOUND,
                format!("{resource_type} not found"),
                "NOT_FOUND".to_string(),
                None,
            ),
            ApplicationError::InUse { resource_type, .. } => (
                StatusCode::CONFLICT,
                format!("{resource_type} is still in use and cannot be deleted"),
                format!("{}_IN_USE", resource_type.to_uppercase()),
                None,
            ),
            ApplicationError::Infrastructure(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Store operation failed".to_string(),
                "STORE_ERROR".to_string(),
                Some(err.to_string()),
            ),
        };
        (
            status,
            ErrorResponse {
                message,
                error,
                detail,
            },
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), code = %body.error, "Request refused");
        }
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
