//! Tracing setup for the scoring service. A `RUST_LOG` environment filter
//! takes precedence; otherwise the configured log level becomes the global
//! directive.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global subscriber. May only succeed once per process.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::Filter {
            value: config.log_level.clone(),
            source,
        })
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_filter_directive_is_reported() {
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "not a directive!!".to_string(),
        };
        let err = init(&config).err();
        match err {
            Some(TelemetryError::Filter { value, .. }) => {
                assert_eq!(value, "not a directive!!");
            }
            other => panic!("expected filter error, got {other:?}"),
        }
    }
}
