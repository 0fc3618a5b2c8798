// Google Maps web-service clients and the JSON helpers they share.

pub mod google_directions;
pub mod google_places;

use serde_json::Value;

use crate::error::ProviderError;

/// Checks the `status` field every Google Maps web-service response carries.
/// `ZERO_RESULTS` is a valid, empty answer.
pub(crate) fn check_status(value: &Value) -> Result<ServiceStatus, ProviderError> {
    match value.get("status").and_then(Value::as_str) {
        Some("OK") => Ok(ServiceStatus::Ok),
        Some("ZERO_RESULTS") => Ok(ServiceStatus::ZeroResults),
        Some(other) => {
            let detail = value
                .get("error_message")
                .and_then(Value::as_str)
                .map(|m| format!("{}: {}", other, m))
                .unwrap_or_else(|| other.to_string());
            Err(ProviderError::Status(detail))
        }
        None => Err(ProviderError::Malformed("missing status".to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ServiceStatus {
    Ok,
    ZeroResults,
}

pub(crate) fn extract_string(val: &Value) -> String {
    val.as_str().unwrap_or_default().to_string()
}

pub(crate) fn extract_opt_string(val: &Value) -> Option<String> {
    val.as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn extract_f64(val: &Value) -> Option<f64> {
    val.as_f64()
}

pub(crate) fn extract_strings(val: &Value) -> Vec<String> {
    val.as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(feature = "google")]
pub(crate) async fn get_json(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<Value, ProviderError> {
    let response = client.get(url).query(query).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(ProviderError::Transport(format!(
            "API error {}: {}",
            status, error_text
        )));
    }

    Ok(response.json::<Value>().await?)
}
