//! Great-circle distance between two latitude/longitude points using the
//! Haversine formula. Distances are in kilometers and ignore altitude.

use super::geocode::GeocodedLocation;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub type Coord = (f64, f64);

/// Distance in kilometers between two `(latitude, longitude)` pairs given in
/// degrees. Not rounded.
pub fn distance_km(start: Coord, end: Coord) -> f64 {
    let (lat1, lon1) = start;
    let (lat2, lon2) = end;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn distance_between(start: &GeocodedLocation, end: &GeocodedLocation) -> f64 {
    distance_km(
        (start.latitude, start.longitude),
        (end.latitude, end.longitude),
    )
}

/// Rounds half-up (away from zero) to `places` decimals.
///
/// The scaled value is first snapped to 9 decimals so that binary
/// representation error does not move a half-way value below the midpoint:
/// `10.3 * 3.5 * 100.0` is `3604.9999999999995`, which must round to 3605.
pub fn round_half_up(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    let snapped = (scaled * 1e9).round() / 1e9;
    snapped.round() / factor
}
