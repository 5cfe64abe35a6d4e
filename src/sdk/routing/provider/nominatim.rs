use crate::sdk::config::QuoteConfig;
use crate::sdk::routing::error::GeocodeError;
use crate::sdk::routing::geocode::{parse_search_response, GeocodeOutcome};
use crate::sdk::routing::service::Geocoder;
use crate::sdk::util::rate_limit::{geocode_limiter, Limiter};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

/// Text-search geocoder backed by an OpenStreetMap Nominatim instance.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    limiter: Option<Limiter>,
}

impl NominatimGeocoder {
    pub fn new(config: &QuoteConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // Nominatim's terms require a User-Agent that identifies the client.
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.geocoder_base_url.trim_end_matches('/').to_string(),
            limiter: geocode_limiter(config.geocode_delay),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodeOutcome, GeocodeError> {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
        log::debug!("[GEOCODER] Searching Nominatim for \"{}\"", address);

        let url = self.search_url();
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("q", address), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::error!(
                "[GEOCODER] Nominatim returned non-success status: {}. Body: {}",
                status,
                text
            );
            return Err(GeocodeError::HttpStatus { status, body: text });
        }

        parse_search_response(&text).map_err(|e| {
            log::error!(
                "[GEOCODER] Failed to parse search response. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })
    }
}
