use std::time::Duration;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "GROWTH_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base of the versioned API, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientSettings {
    /// Defaults, with the base URL taken from `GROWTH_API_URL` when set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(API_URL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub period: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(3),
        }
    }
}
