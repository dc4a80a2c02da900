//! Log subscriber setup.
//!
//! The library only emits `tracing` events. Applications that want them
//! printed call [`init`] once at startup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{LabError, Result};

/// Install a global `fmt` subscriber described by `config`.
///
/// Returns `Ok(false)` if a global subscriber was already installed, which
/// is left in place.
///
/// # Errors
///
/// Returns [`LabError::Config`] if the filter directives do not parse.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| LabError::config(format!("invalid log filter '{}': {e}", config.filter)))?;

    let installed = match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).with_level(true))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
    };

    Ok(installed.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_rejected() {
        let config = LoggingConfig {
            filter: "regex_lab=notalevel".to_string(),
            format: LogFormat::Text,
        };
        assert!(init(&config).is_err());
    }

    #[test]
    fn second_init_is_not_an_error() {
        let config = LoggingConfig::default();
        let _ = init(&config).unwrap();
        assert!(!init(&config).unwrap());
    }
}
