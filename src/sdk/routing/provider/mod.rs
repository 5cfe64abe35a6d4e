pub mod cached;
pub mod nominatim;
pub mod types;

pub use cached::CachedGeocoder;
pub use nominatim::NominatimGeocoder;
