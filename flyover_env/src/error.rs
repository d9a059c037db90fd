//! Error types for the Flyover environment abstraction.

use thiserror::Error;

/// Errors that can occur in the environment abstraction layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// The camera animator failed or was interrupted mid-transition
    #[error("Animation error: {0}")]
    AnimationError(String),

    /// The geocoding service failed (network, quota, malformed address)
    #[error("Geocoding error: {0}")]
    GeocodingError(String),

    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Operation timed out
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl EnvError {
    /// Creates an animation error.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::AnimationError(msg.into())
    }

    /// Creates a geocoding error.
    pub fn geocoding(msg: impl Into<String>) -> Self {
        Self::GeocodingError(msg.into())
    }
}
