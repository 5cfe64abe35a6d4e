use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "TranslateLux Taxi Service";

/// Nominatim rejects clients that send more than one request per second.
pub const MIN_GEOCODE_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a whole number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must not be empty")]
    Empty { name: &'static str },

    #[error("{0} is not set")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteConfig {
    pub geocoder_base_url: String,
    pub user_agent: String,
    /// Pause between the pickup and dropoff geocode calls.
    pub geocode_delay: Duration,
    pub request_timeout: Duration,
    pub debounce: Duration,
    pub reservation_url: Option<String>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            geocoder_base_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geocode_delay: MIN_GEOCODE_DELAY,
            request_timeout: DEFAULT_HTTP_TIMEOUT,
            debounce: DEFAULT_DEBOUNCE,
            reservation_url: None,
        }
    }
}

impl QuoteConfig {
    /// Reads the configuration from the process environment. Loading a
    /// `.env` file, if wanted, is up to the caller.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let geocoder_base_url = match lookup("NOMINATIM_URL") {
            Some(url) => non_empty("NOMINATIM_URL", url)?
                .trim_end_matches('/')
                .to_string(),
            None => defaults.geocoder_base_url,
        };
        let user_agent = match lookup("GEOCODER_USER_AGENT") {
            Some(agent) => non_empty("GEOCODER_USER_AGENT", agent)?,
            None => defaults.user_agent,
        };

        let mut geocode_delay = millis(&lookup, "GEOCODE_DELAY_MS")?.unwrap_or(MIN_GEOCODE_DELAY);
        if geocode_delay < MIN_GEOCODE_DELAY {
            log::warn!(
                "GEOCODE_DELAY_MS={} is below the provider minimum, using {} ms",
                geocode_delay.as_millis(),
                MIN_GEOCODE_DELAY.as_millis()
            );
            geocode_delay = MIN_GEOCODE_DELAY;
        }

        let request_timeout = match number(&lookup, "HTTP_TIMEOUT_SECS")? {
            Some(secs) => Duration::from_secs(secs),
            None => defaults.request_timeout,
        };
        let debounce = millis(&lookup, "QUOTE_DEBOUNCE_MS")?.unwrap_or(defaults.debounce);
        let reservation_url = lookup("RESERVATION_API_URL").filter(|url| !url.trim().is_empty());

        Ok(Self {
            geocoder_base_url,
            user_agent,
            geocode_delay,
            request_timeout,
            debounce,
            reservation_url,
        })
    }

    pub fn require_reservation_url(&self) -> Result<&str, ConfigError> {
        self.reservation_url
            .as_deref()
            .ok_or(ConfigError::Missing("RESERVATION_API_URL"))
    }
}

fn non_empty(name: &'static str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Empty { name })
    } else {
        Ok(value)
    }
}

fn number<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { name, value })
        })
        .transpose()
}

fn millis<F>(lookup: &F, name: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(number(lookup, name)?.map(Duration::from_millis))
}
