use crate::config::ConfigError;
use crate::feed::FeedError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Top-level error for the orchestrating binary. The scoring core
/// itself is total and never surfaces one of these; they cover the
/// configuration, telemetry, and feed edges around it.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Feed(FeedError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Feed(err) => write!(f, "feed error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Feed(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<FeedError> for AppError {
    fn from(value: FeedError) -> Self {
        Self::Feed(value)
    }
}
