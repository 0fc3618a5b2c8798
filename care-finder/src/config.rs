use shared_types::{Coordinate, TravelMode};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
pub const DEFAULT_ASK_AI_URL: &str = "http://127.0.0.1:7860";
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 5000;
/// How long the device gets to answer a position request before the
/// fallback is used.
pub const DEFAULT_LOCATION_TIMEOUT_MS: u32 = 10_000;
/// New York City, used when the device cannot report a position.
pub const FALLBACK_LOCATION: Coordinate = Coordinate::new(40.7128, -74.0060);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub radius_meters: u32,
    pub fallback: Coordinate,
    pub travel_mode: TravelMode,
    pub location_timeout_ms: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
            fallback: FALLBACK_LOCATION,
            travel_mode: TravelMode::Driving,
            location_timeout_ms: DEFAULT_LOCATION_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub ask_ai_url: String,
    pub search: SearchSettings,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            ask_ai_url: DEFAULT_ASK_AI_URL.to_string(),
            search: SearchSettings::default(),
        }
    }
}

impl FinderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset or unparsable values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let radius_meters = get("SEARCH_RADIUS_METERS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|r| *r > 0)
            .unwrap_or(defaults.search.radius_meters);

        let location_timeout_ms = get("LOCATION_TIMEOUT_MS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.search.location_timeout_ms);

        let fallback = match (
            get("FALLBACK_LAT").and_then(|v| v.parse::<f64>().ok()),
            get("FALLBACK_LNG").and_then(|v| v.parse::<f64>().ok()),
        ) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
            _ => defaults.search.fallback,
        };

        Self {
            api_key: get("GOOGLE_MAPS_API_KEY"),
            base_url: get("GOOGLE_MAPS_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            ask_ai_url: get("ASK_AI_URL").unwrap_or(defaults.ask_ai_url),
            search: SearchSettings {
                radius_meters,
                fallback,
                location_timeout_ms,
                ..defaults.search
            },
        }
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::Missing("GOOGLE_MAPS_API_KEY"))
    }
}
