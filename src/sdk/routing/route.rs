use super::error::GeocodeError;
use super::geocode::{GeocodeOutcome, GeocodedLocation};
use super::haversine::{distance_between, round_half_up};
use super::service::Geocoder;
use crate::sdk::config::{QuoteConfig, MIN_GEOCODE_DELAY};
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Addresses shorter than this are not worth a geocoding request.
pub const MIN_ADDRESS_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEstimate {
    /// Great-circle distance, rounded to one decimal.
    pub distance_km: f64,
    pub formatted_pickup_address: String,
    pub formatted_dropoff_address: String,
}

/// Turns a pickup and a dropoff address into a [`RouteEstimate`].
///
/// The two addresses are geocoded one after the other with a fixed pause in
/// between; the public Nominatim service allows a single request per second.
/// Every failure is logged and reported as `None`.
pub struct RouteEstimator<G> {
    geocoder: G,
    delay: Duration,
    timeout: Duration,
}

pub fn is_queryable(address: &str) -> bool {
    address.trim().chars().count() >= MIN_ADDRESS_LEN
}

impl<G: Geocoder> RouteEstimator<G> {
    /// `delay` is raised to [`MIN_GEOCODE_DELAY`] if shorter. `timeout`
    /// bounds each geocode call.
    pub fn new(geocoder: G, delay: Duration, timeout: Duration) -> Self {
        Self {
            geocoder,
            delay: delay.max(MIN_GEOCODE_DELAY),
            timeout,
        }
    }

    pub fn from_config(geocoder: G, config: &QuoteConfig) -> Self {
        Self::new(geocoder, config.geocode_delay, config.request_timeout)
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Geocodes `pickup`, waits [`delay`](Self::delay), geocodes `dropoff`
    /// and returns the rounded great-circle distance between them. Any
    /// failure yields `None`. When the pickup cannot be resolved the dropoff
    /// is never looked up.
    pub async fn estimate(&self, pickup: &str, dropoff: &str) -> Option<RouteEstimate> {
        self.estimate_cancellable(pickup, dropoff, &CancellationToken::new())
            .await
    }

    /// Like [`estimate`](Self::estimate), but gives up with `None` as soon as
    /// `cancel` fires. An unknown pickup also ends the estimate before the
    /// dropoff request.
    pub async fn estimate_cancellable(
        &self,
        pickup: &str,
        dropoff: &str,
        cancel: &CancellationToken,
    ) -> Option<RouteEstimate> {
        if !is_queryable(pickup) || !is_queryable(dropoff) {
            log::debug!("[ESTIMATOR] Address too short, skipping estimate");
            return None;
        }

        // No point in asking for the dropoff if the pickup is unknown.
        let pickup_location = self.resolve("pickup", pickup, cancel).await?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("[ESTIMATOR] Cancelled while waiting between geocode calls");
                return None;
            }
            _ = tokio::time::sleep(self.delay) => {}
        }

        let dropoff_location = self.resolve("dropoff", dropoff, cancel).await?;

        let distance_km = round_half_up(distance_between(&pickup_location, &dropoff_location), 1);
        log::info!(
            "[ESTIMATOR] {} → {}: {:.1} km",
            pickup_location.formatted_address,
            dropoff_location.formatted_address,
            distance_km
        );

        Some(RouteEstimate {
            distance_km,
            formatted_pickup_address: pickup_location.formatted_address,
            formatted_dropoff_address: dropoff_location.formatted_address,
        })
    }

    async fn resolve(
        &self,
        leg: &str,
        address: &str,
        cancel: &CancellationToken,
    ) -> Option<GeocodedLocation> {
        let lookup = tokio::time::timeout(self.timeout, self.geocoder.geocode(address));
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("[ESTIMATOR] Cancelled while geocoding {} address", leg);
                return None;
            }
            result = lookup => result.unwrap_or(Err(GeocodeError::Timeout)),
        };

        match result {
            Ok(GeocodeOutcome::Resolved(location)) => Some(location),
            Ok(GeocodeOutcome::NotFound) => {
                log::info!("[ESTIMATOR] No match for {} address \"{}\"", leg, address);
                None
            }
            Err(e) => {
                log::warn!(
                    "[ESTIMATOR] Geocoding {} address \"{}\" failed: {}",
                    leg,
                    address,
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Clone)]
    enum Reply {
        At(f64, f64),
        Missing,
        Unreachable,
        Hang,
    }

    struct ScriptedGeocoder {
        replies: HashMap<&'static str, Reply>,
        calls: Mutex<Vec<(String, Instant)>>,
    }

    impl ScriptedGeocoder {
        fn new(replies: &[(&'static str, Reply)]) -> Self {
            Self {
                replies: replies.iter().cloned().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, Instant)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Geocoder for ScriptedGeocoder {
        async fn geocode(&self, address: &str) -> Result<GeocodeOutcome, GeocodeError> {
            self.calls
                .lock()
                .unwrap()
                .push((address.to_string(), Instant::now()));
            match self.replies.get(address).cloned().unwrap_or(Reply::Missing) {
                Reply::At(latitude, longitude) => Ok(GeocodeOutcome::Resolved(GeocodedLocation {
                    latitude,
                    longitude,
                    formatted_address: format!("{} (resolved)", address),
                })),
                Reply::Missing => Ok(GeocodeOutcome::NotFound),
                Reply::Unreachable => Err(GeocodeError::HttpStatus {
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                    body: String::new(),
                }),
                Reply::Hang => {
                    std::future::pending::<()>().await;
                    Ok(GeocodeOutcome::NotFound)
                }
            }
        }
    }

    fn estimator(replies: &[(&'static str, Reply)]) -> RouteEstimator<ScriptedGeocoder> {
        RouteEstimator::new(
            ScriptedGeocoder::new(replies),
            Duration::from_millis(1000),
            Duration::from_secs(10),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn equator_degree_is_111_2_km() {
        let estimator = estimator(&[
            ("Origin", Reply::At(0.0, 0.0)),
            ("One East", Reply::At(0.0, 1.0)),
        ]);

        let estimate = estimator.estimate("Origin", "One East").await.unwrap();

        assert_eq!(estimate.distance_km, 111.2);
        assert_eq!(estimate.formatted_pickup_address, "Origin (resolved)");
        assert_eq!(estimate.formatted_dropoff_address, "One East (resolved)");
    }

    #[tokio::test(start_paused = true)]
    async fn dropoff_waits_for_the_delay() {
        let estimator = estimator(&[
            ("Gare", Reply::At(49.5999, 6.1338)),
            ("Findel", Reply::At(49.6266, 6.2115)),
        ]);

        estimator.estimate("Gare", "Findel").await.unwrap();

        let calls = estimator.geocoder().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "Gare");
        assert_eq!(calls[1].0, "Findel");
        assert!(calls[1].1 - calls[0].1 >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn short_address_makes_no_request() {
        let estimator = estimator(&[("Findel", Reply::At(49.6266, 6.2115))]);

        assert!(estimator.estimate("ab", "Findel").await.is_none());
        assert!(estimator.estimate("Findel", "  x ").await.is_none());
        assert!(estimator.estimate("", "").await.is_none());
        assert!(estimator.geocoder().calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_pickup_is_unavailable() {
        let estimator = estimator(&[
            ("Atlantis", Reply::Missing),
            ("Findel", Reply::At(49.6266, 6.2115)),
        ]);

        assert!(estimator.estimate("Atlantis", "Findel").await.is_none());
        let calls = estimator.geocoder().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Atlantis");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_dropoff_is_unavailable() {
        let estimator = estimator(&[("Findel", Reply::At(49.6266, 6.2115))]);
        assert!(estimator.estimate("Findel", "Atlantis").await.is_none());
        assert_eq!(estimator.geocoder().calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn provider_errors_are_swallowed() {
        let estimator = estimator(&[
            ("Findel", Reply::At(49.6266, 6.2115)),
            ("Down", Reply::Unreachable),
        ]);
        assert!(estimator.estimate("Down", "Findel").await.is_none());
        assert!(estimator.estimate("Findel", "Down").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_provider_times_out() {
        let estimator = estimator(&[
            ("Findel", Reply::At(49.6266, 6.2115)),
            ("Slow", Reply::Hang),
        ]);

        let started = Instant::now();
        assert!(estimator.estimate("Slow", "Findel").await.is_none());
        assert!(started.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_during_delay_skips_dropoff() {
        let estimator = estimator(&[
            ("Gare", Reply::At(49.5999, 6.1338)),
            ("Findel", Reply::At(49.6266, 6.2115)),
        ]);
        let cancel = CancellationToken::new();

        let canceller = {
            let cancel = cancel.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(500)).await;
                cancel.cancel();
            }
        };
        let (estimate, _) = tokio::join!(
            estimator.estimate_cancellable("Gare", "Findel", &cancel),
            canceller
        );

        assert!(estimate.is_none());
        assert_eq!(estimator.geocoder().calls().len(), 1);
    }

    #[test]
    fn delay_is_never_below_the_provider_minimum() {
        let estimator = RouteEstimator::new(
            ScriptedGeocoder::new(&[]),
            Duration::from_millis(10),
            Duration::from_secs(1),
        );
        assert_eq!(estimator.delay(), MIN_GEOCODE_DELAY);
    }
}
