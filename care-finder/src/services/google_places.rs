// Google Places web service: nearby search and place details.

use serde_json::Value;
use shared_types::{Coordinate, OpeningHours, Place, PlaceCategory, PlaceDetails};

use crate::error::ProviderError;
use crate::services::{
    check_status, extract_f64, extract_opt_string, extract_string, extract_strings,
    ServiceStatus,
};

#[cfg(feature = "google")]
use crate::{config::FinderConfig, error::ConfigError, providers::PlacesProvider, services::get_json};

#[cfg(feature = "google")]
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[cfg(feature = "google")]
impl GooglePlacesClient {
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

    /// Places of one category within `radius_meters` of `origin`.
    pub async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        category: PlaceCategory,
    ) -> Result<Vec<Place>, ProviderError> {
        let url = format!("{}/place/nearbysearch/json", self.base_url);
        let query = [
            ("location", origin.to_string()),
            ("radius", radius_meters.to_string()),
            ("type", category.as_str().to_string()),
            ("key", self.api_key.clone()),
        ];

        let value = get_json(&self.client, &url, &query).await?;
        let places = parse_nearby_results(&value, category)?;
        tracing::debug!(%category, count = places.len(), "nearby search");
        Ok(places)
    }

    pub async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, ProviderError> {
        let url = format!("{}/place/details/json", self.base_url);
        let query = [
            ("place_id", place_id.to_string()),
            ("fields", fields.join(",")),
            ("key", self.api_key.clone()),
        ];

        let value = get_json(&self.client, &url, &query).await?;
        parse_place_details(&value)
    }
}

#[cfg(feature = "google")]
impl PlacesProvider for GooglePlacesClient {
    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        category: PlaceCategory,
    ) -> Result<Vec<Place>, ProviderError> {
        GooglePlacesClient::nearby_search(self, origin, radius_meters, category).await
    }

    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, ProviderError> {
        GooglePlacesClient::place_details(self, place_id, fields).await
    }
}

/// Parse a nearby-search response into places of the searched category.
/// Results without an id or a location are skipped.
pub fn parse_nearby_results(
    value: &Value,
    category: PlaceCategory,
) -> Result<Vec<Place>, ProviderError> {
    if check_status(value)? == ServiceStatus::ZeroResults {
        return Ok(Vec::new());
    }

    let results = value
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Malformed("missing results".to_string()))?;

    Ok(results
        .iter()
        .filter_map(|result| convert_result_to_place(result, category))
        .collect())
}

fn convert_result_to_place(val: &Value, category: PlaceCategory) -> Option<Place> {
    let id = extract_opt_string(&val["place_id"])?;
    let location = &val["geometry"]["location"];
    let coordinate = Coordinate::new(
        extract_f64(&location["lat"])?,
        extract_f64(&location["lng"])?,
    );

    Some(Place {
        id,
        name: extract_string(&val["name"]),
        coordinate,
        address: extract_string(&val["vicinity"]),
        category,
        specialization: extract_strings(&val["types"]),
        phone: None,
        website: None,
        opening_hours: None,
    })
}

pub fn parse_place_details(value: &Value) -> Result<PlaceDetails, ProviderError> {
    if check_status(value)? == ServiceStatus::ZeroResults {
        return Err(ProviderError::Status("ZERO_RESULTS".to_string()));
    }

    let result = value
        .get("result")
        .ok_or_else(|| ProviderError::Malformed("missing result".to_string()))?;

    let opening_hours = result.get("opening_hours").map(|hours| OpeningHours {
        open_now: hours.get("open_now").and_then(Value::as_bool),
        weekday_text: extract_strings(&hours["weekday_text"]),
    });

    Ok(PlaceDetails {
        name: extract_opt_string(&result["name"]),
        phone: extract_opt_string(&result["formatted_phone_number"]),
        formatted_address: extract_opt_string(&result["formatted_address"]),
        types: extract_strings(&result["types"]),
        opening_hours,
        website: extract_opt_string(&result["website"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_nearby_results_to_places() {
        let response = json!({
            "status": "OK",
            "results": [
                {
                    "place_id": "ChIJ1",
                    "name": "Bellevue Hospital",
                    "vicinity": "462 1st Avenue, New York",
                    "types": ["hospital", "health", "point_of_interest"],
                    "geometry": { "location": { "lat": 40.739, "lng": -73.975 } }
                },
                {
                    "place_id": "ChIJ2",
                    "name": "No location",
                    "vicinity": "somewhere",
                    "types": ["hospital"]
                }
            ]
        });

        let places = parse_nearby_results(&response, PlaceCategory::Hospital).unwrap();
        assert_eq!(places.len(), 1);

        let place = &places[0];
        assert_eq!(place.id, "ChIJ1");
        assert_eq!(place.address, "462 1st Avenue, New York");
        assert_eq!(place.coordinate, Coordinate::new(40.739, -73.975));
        assert_eq!(place.category, PlaceCategory::Hospital);
        assert_eq!(
            place.specialization_label(),
            "hospital, health, point_of_interest"
        );
        assert!(place.phone.is_none());
    }

    #[test]
    fn zero_results_is_empty() {
        let response = json!({ "status": "ZERO_RESULTS", "results": [] });
        assert!(parse_nearby_results(&response, PlaceCategory::Pharmacy)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn denied_request_is_an_error() {
        let response = json!({ "status": "REQUEST_DENIED", "results": [] });
        assert!(matches!(
            parse_nearby_results(&response, PlaceCategory::Pharmacy),
            Err(ProviderError::Status(_))
        ));
    }

    #[test]
    fn parses_details() {
        let response = json!({
            "status": "OK",
            "result": {
                "name": "Duane Reade",
                "formatted_phone_number": "(212) 555-0199",
                "formatted_address": "100 Broadway, New York, NY 10005, USA",
                "types": ["pharmacy", "store"],
                "opening_hours": {
                    "open_now": false,
                    "weekday_text": ["Monday: 7:00 AM – 10:00 PM"]
                }
            }
        });

        let details = parse_place_details(&response).unwrap();
        assert_eq!(details.phone.as_deref(), Some("(212) 555-0199"));
        assert_eq!(details.website, None);
        assert_eq!(details.types, vec!["pharmacy", "store"]);
        let hours = details.opening_hours.unwrap();
        assert_eq!(hours.open_now, Some(false));
        assert_eq!(hours.weekday_text.len(), 1);
    }

    #[test]
    fn details_without_result_is_malformed() {
        let response = json!({ "status": "OK" });
        assert!(matches!(
            parse_place_details(&response),
            Err(ProviderError::Malformed(_))
        ));
    }
}
