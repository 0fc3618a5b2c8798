use leptos::prelude::*;
use leptos::server;
use shared_types::{Coordinate, Place, PlaceCategory, PlaceDetails, Route, TravelMode};

#[cfg(feature = "ssr")]
use crate::clients::{config, directions_client, places_client};

#[server]
pub async fn fetch_nearby_places(
    origin: Coordinate,
    radius_meters: u32,
    category: PlaceCategory,
) -> Result<Vec<Place>, ServerFnError> {
    let client = places_client().map_err(|e| ServerFnError::new(e.to_string()))?;

    client
        .nearby_search(origin, radius_meters, category)
        .await
        .map_err(|e| {
            tracing::warn!(%category, error = %e, "nearby search failed");
            ServerFnError::new(format!("Places error: {}", e))
        })
}

#[server]
pub async fn fetch_place_details(
    place_id: String,
    fields: Vec<String>,
) -> Result<PlaceDetails, ServerFnError> {
    let client = places_client().map_err(|e| ServerFnError::new(e.to_string()))?;
    let fields: Vec<&str> = fields.iter().map(String::as_str).collect();

    client
        .place_details(&place_id, &fields)
        .await
        .map_err(|e| ServerFnError::new(format!("Details error for {}: {}", place_id, e)))
}

#[server]
pub async fn fetch_route(
    origin: Coordinate,
    destination: Coordinate,
    mode: TravelMode,
) -> Result<Route, ServerFnError> {
    let client = directions_client().map_err(|e| ServerFnError::new(e.to_string()))?;

    client
        .route(origin, destination, mode)
        .await
        .map_err(|e| ServerFnError::new(format!("Directions error: {}", e)))
}

#[server]
pub async fn get_ask_ai_url() -> Result<String, ServerFnError> {
    Ok(config().ask_ai_url.clone())
}
