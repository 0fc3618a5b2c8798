// Capabilities the finder needs from the outside world. Each one is a trait so
// the browser, the CLI and the tests can plug in their own implementation.
#![allow(async_fn_in_trait)]

use shared_types::{Coordinate, Place, PlaceCategory, PlaceDetails, Route, TravelMode};

use crate::error::{LocationFailure, ProviderError};

pub trait GeolocationProvider {
    async fn current_position(&self) -> Result<Coordinate, LocationFailure>;
}

pub trait PlacesProvider {
    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_meters: u32,
        category: PlaceCategory,
    ) -> Result<Vec<Place>, ProviderError>;

    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, ProviderError>;
}

pub trait DirectionsProvider {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Route, ProviderError>;
}

/// A position known up front. `None` behaves like a device without
/// geolocation support.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocation(pub Option<Coordinate>);

impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<Coordinate, LocationFailure> {
        self.0.ok_or(LocationFailure::Unsupported)
    }
}

/// Reads the position from `FINDER_LAT` / `FINDER_LNG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvGeolocation;

impl GeolocationProvider for EnvGeolocation {
    async fn current_position(&self) -> Result<Coordinate, LocationFailure> {
        let (Ok(lat), Ok(lng)) = (std::env::var("FINDER_LAT"), std::env::var("FINDER_LNG")) else {
            return Err(LocationFailure::Unsupported);
        };
        parse_position(&lat, &lng)
    }
}

fn parse_position(lat: &str, lng: &str) -> Result<Coordinate, LocationFailure> {
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| LocationFailure::PositionUnavailable)?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| LocationFailure::PositionUnavailable)?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(LocationFailure::PositionUnavailable);
    }
    Ok(Coordinate::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_positions() {
        assert_eq!(
            parse_position(" 47.6 ", "-117.4"),
            Ok(Coordinate::new(47.6, -117.4))
        );
    }

    #[test]
    fn rejects_out_of_range_positions() {
        assert_eq!(
            parse_position("91", "0"),
            Err(LocationFailure::PositionUnavailable)
        );
        assert_eq!(
            parse_position("north", "0"),
            Err(LocationFailure::PositionUnavailable)
        );
    }

    #[tokio::test]
    async fn fixed_geolocation_without_position_is_unsupported() {
        assert_eq!(
            FixedGeolocation(None).current_position().await,
            Err(LocationFailure::Unsupported)
        );
    }
}
