use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Allows one geocoding request per `spacing`. Nominatim's usage policy asks
/// for at most one request per second from a single client.
///
/// Returns `None` when `spacing` is zero.
pub fn geocode_limiter(spacing: Duration) -> Option<Limiter> {
    let quota = Quota::with_period(spacing)?;
    Some(Arc::new(RateLimiter::direct(quota)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_spacing_has_no_limiter() {
        assert!(geocode_limiter(Duration::ZERO).is_none());
    }

    #[test]
    fn first_request_is_admitted_immediately() {
        let limiter = geocode_limiter(Duration::from_secs(1)).unwrap();
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }
}
