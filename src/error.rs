//! Error types and handling for the Surtigo core

use thiserror::Error;

/// Main error type for the Surtigo core
#[derive(Error, Debug)]
pub enum SurtigoError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Station fetch or geocoding failures
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Location sensing failures
    #[error(transparent)]
    Location(#[from] LocationError),

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl SurtigoError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Failure while talking to the station or geocoding backends.
///
/// The message is opaque to the core; callers surface `user_message` and
/// decide when to retry. The core itself never retries.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// User-facing message for a failed station load
    #[must_use]
    pub fn user_message(&self) -> String {
        "Could not load stations. Please try again.".to_string()
    }
}

/// Failure while resolving the device position.
///
/// Codes 1/2/3 reported by the sensor map to `PermissionDenied`,
/// `PositionUnavailable` and `Timeout`; anything else becomes `Unknown`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("geolocation is not supported on this host")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("timed out waiting for a position fix")]
    Timeout,

    #[error("unknown geolocation error")]
    Unknown,
}

impl LocationError {
    /// Map a raw sensor error code to the corresponding variant
    #[must_use]
    pub fn from_sensor_code(code: Option<u8>) -> Self {
        match code {
            Some(1) => LocationError::PermissionDenied,
            Some(2) => LocationError::PositionUnavailable,
            Some(3) => LocationError::Timeout,
            _ => LocationError::Unknown,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LocationError::Unsupported => {
                "Geolocation is not supported in this browser.".to_string()
            }
            LocationError::PermissionDenied => {
                "Location permission denied. You can search for a place manually.".to_string()
            }
            LocationError::PositionUnavailable => {
                "Your location could not be determined.".to_string()
            }
            LocationError::Timeout => "Timed out while getting your location.".to_string(),
            LocationError::Unknown => "Unknown geolocation error.".to_string(),
        }
    }
}
