//! # Telemetry
//!
//! Installs the global `tracing` subscriber.
//!
//! `RUST_LOG` wins over [`LoggingConfig::level`] when set. Output is either
//! human-readable or one JSON object per line.

use crate::application::error::InfrastructureError;
use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// Returns [`InfrastructureError::Configuration`] if the filter directive
/// does not parse or a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = env_filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    };
    installed.map_err(|e| InfrastructureError::configuration(e.to_string()))
}

fn env_filter(level: &str) -> Result<EnvFilter, InfrastructureError> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_filter(from_env.as_deref(), level)
}

/// A parseable `RUST_LOG` value wins; otherwise `level` must parse.
fn build_filter(from_env: Option<&str>, level: &str) -> Result<EnvFilter, InfrastructureError> {
    if let Some(filter) = from_env.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| {
        InfrastructureError::configuration(format!("logging.level `{level}`: {e}"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn configured_directive_parses() {
        let filter = build_filter(None, "event_manager=debug,tower_http=info").unwrap();
        assert!(filter.to_string().contains("event_manager=debug"));
    }

    #[test]
    fn malformed_level_is_configuration_error() {
        let err = build_filter(None, "event_manager=loud").unwrap_err();
        assert!(matches!(err, InfrastructureError::Configuration(_)));
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn environment_directives_take_precedence() {
        let filter = build_filter(Some("tower_http=trace"), "event_manager=loud").unwrap();
        assert!(filter.to_string().contains("tower_http=trace"));
    }

    #[test]
    fn malformed_environment_falls_back_to_level() {
        let filter = build_filter(Some("tower_http=loud"), "warn").unwrap();
        assert!(filter.to_string().contains("warn"));
    }
}
