//! Liveness and store diagnostics.

use super::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Store diagnostic response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticResponse {
    /// `"success"` or `"failed"`.
    pub connection: String,
    /// Store backend name.
    pub backend: String,
    /// Failure message, if the round trip failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/diagnostic`
///
/// Performs one store round trip; 503 if it fails.
pub async fn diagnostic(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<DiagnosticResponse>) {
    let backend = state.probe.backend().to_string();
    match state.probe.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(DiagnosticResponse {
                connection: "success".to_string(),
                backend,
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, backend = %backend, "Store diagnostic failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(DiagnosticResponse {
                    connection: "failed".to_string(),
                    backend,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
