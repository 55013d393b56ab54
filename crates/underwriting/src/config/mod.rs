use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scoring pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub underwriting: UnderwritingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let premium_ceiling = match env::var("APP_PREMIUM_CEILING") {
            Ok(raw) => Some(
                raw.trim()
                    .replace(',', "")
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidPremiumCeiling { value: raw })?,
            ),
            Err(_) => None,
        };

        let risk_reference_year = match env::var("APP_RISK_REFERENCE_YEAR") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidReferenceYear { value: raw })?,
            Err(_) => UnderwritingConfig::DEFAULT_REFERENCE_YEAR,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            underwriting: UnderwritingConfig {
                premium_ceiling,
                risk_reference_year,
            },
        })
    }
}

/// Tunable underwriting thresholds that vary across carrier guidelines.
#[derive(Debug, Clone)]
pub struct UnderwritingConfig {
    /// Upper bound on total premium for the target segment. `None`
    /// keeps each strategy's documented default.
    pub premium_ceiling: Option<f64>,
    /// Year against which building age is normalized by the risk scorer.
    pub risk_reference_year: i32,
}

impl UnderwritingConfig {
    pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;
}

impl Default for UnderwritingConfig {
    fn default() -> Self {
        Self {
            premium_ceiling: None,
            risk_reference_year: Self::DEFAULT_REFERENCE_YEAR,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPremiumCeiling { value: String },
    InvalidReferenceYear { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPremiumCeiling { value } => {
                write!(f, "APP_PREMIUM_CEILING '{value}' must parse to a number")
            }
            ConfigError::InvalidReferenceYear { value } => {
                write!(f, "APP_RISK_REFERENCE_YEAR '{value}' must be a calendar year")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
