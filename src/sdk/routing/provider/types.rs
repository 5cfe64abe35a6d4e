use serde::Deserialize;

/// One candidate from Nominatim's `/search?format=json`. Coordinates come
/// back as decimal strings.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}
