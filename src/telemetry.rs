use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;
use crate::error::MatchingError;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a
/// subscriber is already installed.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), MatchingError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| MatchingError::Telemetry(e.to_string()))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    let result = if settings.format == "pretty" {
        subscriber.pretty().try_init()
    } else {
        subscriber.try_init()
    };

    result.map_err(|e| MatchingError::Telemetry(e.to_string()))
}

