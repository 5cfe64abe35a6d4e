use crate::sdk::routing::cache::GeoCache;
use crate::sdk::routing::error::GeocodeError;
use crate::sdk::routing::geocode::GeocodeOutcome;
use crate::sdk::routing::service::Geocoder;
use std::sync::Mutex;

/// Remembers resolved addresses so repeated quotes for the same address do
/// not hit the provider again. Misses and errors always go through.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: Mutex<GeoCache>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            cache: Mutex::new(GeoCache::default()),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    fn lookup(&self, address: &str) -> Option<GeocodeOutcome> {
        let cache = self.cache.lock().ok()?;
        cache.get_geocode(address).map(GeocodeOutcome::Resolved)
    }

    fn remember(&self, address: &str, outcome: &GeocodeOutcome) {
        if let GeocodeOutcome::Resolved(location) = outcome {
            if let Ok(mut cache) = self.cache.lock() {
                cache.insert_geocode(address, location.clone());
            }
        }
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, address: &str) -> Result<GeocodeOutcome, GeocodeError> {
        if let Some(hit) = self.lookup(address) {
            log::debug!("[CACHE HIT] {}", address);
            return Ok(hit);
        }

        let outcome = self.inner.geocode(address).await?;
        self.remember(address, &outcome);
        Ok(outcome)
    }
}
