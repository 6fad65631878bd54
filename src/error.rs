//! Error taxonomy for the two user-visible channels

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shown whenever the provider gives us nothing better to say.
pub const FALLBACK_LOOKUP_MESSAGE: &str = "Failed to fetch weather data";

/// Why a weather lookup failed. The `Display` text is what the user sees.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum LookupError {
    /// Connection, TLS or body-read failure before a usable response arrived
    #[error("Failed to fetch weather data: {0}")]
    Network(String),
    /// Provider answered with a non-success status
    #[error("{message}")]
    Provider { message: String },
    /// Provider answered 2xx but the body did not match the expected shape
    #[error("Failed to fetch weather data")]
    Parse(String),
}

impl LookupError {
    /// Provider error with the fallback message substituted for a blank one.
    pub fn provider(message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_LOOKUP_MESSAGE.to_string());
        LookupError::Provider { message }
    }
}

/// Why the platform location could not be determined.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum LocationError {
    #[error("Geolocation is not supported on this platform")]
    Unsupported,
    /// Lookup was attempted and refused or failed; the detail goes to the log only
    #[error("Failed to get your location")]
    Unavailable(String),
}

/// Startup configuration that cannot be used.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid weather endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
