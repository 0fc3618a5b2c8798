// Google Directions web service.

use serde_json::Value;
use shared_types::{Coordinate, Route, TravelMode};

use crate::error::ProviderError;
use crate::services::{check_status, extract_string, ServiceStatus};

#[cfg(feature = "google")]
use crate::{
    config::FinderConfig, error::ConfigError, providers::DirectionsProvider, services::get_json,
};

#[cfg(feature = "google")]
#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[cfg(feature = "google")]
impl GoogleDirectionsClient {
    pub fn new(config: &FinderConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_client(
            reqwest::Client::new(),
            &config.base_url,
            config.api_key()?,
        ))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Route, ProviderError> {
        let url = format!("{}/directions/json", self.base_url);
        let query = [
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", mode.as_str().to_string()),
            ("key", self.api_key.clone()),
        ];

        let value = get_json(&self.client, &url, &query).await?;
        parse_directions(&value, origin, destination, mode)
    }
}

#[cfg(feature = "google")]
impl DirectionsProvider for GoogleDirectionsClient {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Route, ProviderError> {
        GoogleDirectionsClient::route(self, origin, destination, mode).await
    }
}

/// Takes the first route of a directions response. Distance and duration are
/// summed over its legs.
pub fn parse_directions(
    value: &Value,
    origin: Coordinate,
    destination: Coordinate,
    mode: TravelMode,
) -> Result<Route, ProviderError> {
    if check_status(value)? == ServiceStatus::ZeroResults {
        return Err(ProviderError::Status("ZERO_RESULTS".to_string()));
    }

    let route = value
        .get("routes")
        .and_then(Value::as_array)
        .and_then(|routes| routes.first())
        .ok_or_else(|| ProviderError::Malformed("no routes".to_string()))?;

    let legs = route["legs"].as_array().map(Vec::as_slice).unwrap_or(&[]);
    let sum = |key: &str| -> u64 {
        legs.iter()
            .filter_map(|leg| leg[key]["value"].as_u64())
            .sum()
    };

    let path = match route["overview_polyline"]["points"].as_str() {
        Some(points) => decode_polyline(points)?,
        None => vec![origin, destination],
    };

    Ok(Route {
        origin,
        destination,
        travel_mode: mode,
        summary: extract_string(&route["summary"]),
        distance_meters: sum("distance"),
        duration_seconds: sum("duration"),
        path,
    })
}

/// Decodes Google's encoded polyline format (precision 1e-5).
pub fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>, ProviderError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let (mut lat, mut lng) = (0i64, 0i64);
    let mut path = Vec::new();

    while index < bytes.len() {
        lat += next_delta(bytes, &mut index)?;
        lng += next_delta(bytes, &mut index)?;
        path.push(Coordinate::new(lat as f64 * 1e-5, lng as f64 * 1e-5));
    }

    Ok(path)
}

fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, ProviderError> {
    let mut result = 0i64;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or_else(|| ProviderError::Malformed("truncated polyline".to_string()))?;
        if !(63..=126).contains(&byte) || shift > 30 {
            return Err(ProviderError::Malformed("invalid polyline".to_string()));
        }
        *index += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
