use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Failures while wiring the tracing subscriber.
#[derive(Debug)]
pub enum TelemetryError {
    Filter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { value, .. } => {
                write!(f, "invalid log filter '{value}'")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level so operators can raise verbosity without editing config.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn build_filter(configured: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(configured).map_err(|source| TelemetryError::Filter {
            value: configured.to_string(),
            source,
        }),
    }
}
