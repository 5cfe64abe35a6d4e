pub mod cache;
pub mod error;
pub mod geocode;
pub mod haversine;
pub mod provider;
pub mod route;
pub mod service;
pub mod session;

pub use cache::{AddressKey, GeoCache};
pub use error::GeocodeError;
pub use geocode::{parse_search_response, GeocodeOutcome, GeocodedLocation};
pub use haversine::{distance_km, round_half_up, Coord};
pub use provider::{CachedGeocoder, NominatimGeocoder};
pub use route::{is_queryable, RouteEstimate, RouteEstimator, MIN_ADDRESS_LEN};
pub use service::Geocoder;
pub use session::{QuoteSession, QuoteState, RouteQuery};
