use super::error::GeocodeError;
use super::provider::types::SearchResult;

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: String,
}

/// What the provider said about an address.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Resolved(GeocodedLocation),
    NotFound,
}

/// Parses a Nominatim `/search?format=json` body. Only the first candidate
/// is considered.
pub fn parse_search_response(body: &str) -> Result<GeocodeOutcome, GeocodeError> {
    let results: Vec<SearchResult> = serde_json::from_str(body)?;
    let Some(first) = results.into_iter().next() else {
        return Ok(GeocodeOutcome::NotFound);
    };

    let latitude = parse_coordinate("lat", &first.lat, 90.0)?;
    let longitude = parse_coordinate("lon", &first.lon, 180.0)?;

    Ok(GeocodeOutcome::Resolved(GeocodedLocation {
        latitude,
        longitude,
        formatted_address: first.display_name,
    }))
}

fn parse_coordinate(field: &'static str, raw: &str, limit: f64) -> Result<f64, GeocodeError> {
    let invalid = || GeocodeError::InvalidCoordinate {
        field,
        value: raw.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() && value.abs() <= limit {
        Ok(value)
    } else {
        Err(invalid())
    }
}
