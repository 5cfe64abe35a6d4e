use reqwest::StatusCode;
use thiserror::Error;

/// Failure to talk to the geocoding provider. A search that simply matched
/// nothing is not an error; see [`GeocodeOutcome::NotFound`](super::geocode::GeocodeOutcome).
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid {field} coordinate {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("Geocoding timed out")]
    Timeout,
}
