//! # Server
//!
//! Process lifecycle: open the store, serve HTTP until a shutdown signal,
//! then drain requests and close the store.

use crate::api::rest::{AppState, create_router};
use crate::application::error::InfrastructureError;
use crate::config::AppConfig;
use crate::infrastructure::persistence::postgres::Database;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Runs the HTTP service until `SIGINT` or `SIGTERM`.
///
/// Pending migrations are applied first when `database.run_migrations` is
/// set. The connection pool is closed after in-flight requests finish.
///
/// # Errors
///
/// Returns [`InfrastructureError`] if the store is unreachable, a migration
/// fails, or the listener cannot bind.
pub async fn serve(config: &AppConfig) -> Result<(), InfrastructureError> {
    let db = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        db.migrate().await?;
    }

    let state = Arc::new(AppState::new(db.repositories()));
    let router = create_router(state);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| InfrastructureError::server(format!("bind {address}: {e}")))?;
    info!(%address, "Listening");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| InfrastructureError::server(e.to_string()));

    db.close().await;
    served
}

/// Applies pending migrations and exits.
///
/// # Errors
///
/// Returns [`InfrastructureError::Database`] if the store is unreachable
/// or a migration fails.
pub async fn migrate(config: &AppConfig) -> Result<(), InfrastructureError> {
    let db = Database::connect(&config.database).await?;
    let result = db.migrate().await;
    db.close().await;
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
