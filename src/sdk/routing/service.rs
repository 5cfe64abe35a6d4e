use super::error::GeocodeError;
use super::geocode::GeocodeOutcome;
use std::future::Future;
use std::sync::Arc;

pub trait Geocoder: Send + Sync {
    /// Resolves a free-text address to its best match.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<GeocodeOutcome, GeocodeError>> + Send;
}

impl<G: Geocoder> Geocoder for Arc<G> {
    async fn geocode(&self, address: &str) -> Result<GeocodeOutcome, GeocodeError> {
        self.as_ref().geocode(address).await
    }
}
