// Browser-side providers for the care finder. Map lookups go through the
// server functions so the API key stays on the server.

use care_finder::{
    CareFinder, DirectionsProvider, FinderSession, PlacesProvider, ProviderError, SearchSettings,
    SessionStore,
};
use leptos::prelude::*;
use shared_types::{Coordinate, Place, PlaceCategory, PlaceDetails, Route, TravelMode};

use crate::geolocation::BrowserGeolocation;
use crate::server::{fetch_nearby_places, fetch_place_details, fetch_route};

pub type BrowserFinder = CareFinder<BrowserGeolocation, ServerPlaces, ServerDirections>;

pub fn browser_finder() -> BrowserFinder {
    let settings = SearchSettings::default();
    CareFinder::new(
        BrowserGeolocation::new(settings.location_timeout_ms),
        ServerPlaces,
        ServerDirections,
        settings,
    )
}

fn transport(err: ServerFnError) -> ProviderError {
    ProviderError::Transport(err.to_string())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ServerPlaces;

impl PlacesProvider for ServerPlaces {
    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        category: PlaceCategory,
    ) -> Result<Vec<Place>, ProviderError> {
        fetch_nearby_places(origin, radius_meters, category)
            .await
            .map_err(transport)
    }

    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, ProviderError> {
        fetch_place_details(
            place_id.to_string(),
            fields.iter().map(|f| f.to_string()).collect(),
        )
        .await
        .map_err(transport)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ServerDirections;

impl DirectionsProvider for ServerDirections {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Route, ProviderError> {
        fetch_route(origin, destination, mode)
            .await
            .map_err(transport)
    }
}

/// A finder session kept in a signal so the view re-renders on change.
#[derive(Debug, Clone, Copy)]
pub struct SignalSession(pub RwSignal<FinderSession>);

impl SessionStore for SignalSession {
    fn update<R>(&self, f: impl FnOnce(&mut FinderSession) -> R) -> R {
        let mut session = self.0.write();
        f(&mut session)
    }

    fn read<R>(&self, f: impl FnOnce(&FinderSession) -> R) -> R {
        self.0.with_untracked(f)
    }
}
