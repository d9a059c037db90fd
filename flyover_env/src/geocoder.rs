//! Geocoding service abstraction.

use async_trait::async_trait;
use crate::error::EnvError;
use crate::types::GeoPoint;

/// Resolves free-text addresses to coordinates.
///
/// # Returns
/// * `Ok(Some(point))` - Best match for the address
/// * `Ok(None)` - The service answered but found no match
/// * `Err(EnvError::GeocodingError)` - The request itself failed
#[async_trait]
pub trait Geocoder: Send + Sync + 'static {
    /// Looks up a single address.
    async fn resolve(&self, address: &str) -> Result<Option<GeoPoint>, EnvError>;
}
