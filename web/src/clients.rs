// Google clients shared by the server functions, set up once at startup.

#[cfg(feature = "ssr")]
use care_finder::{error::ConfigError, FinderConfig, GoogleDirectionsClient, GooglePlacesClient};
#[cfg(feature = "ssr")]
use std::sync::OnceLock;

#[cfg(feature = "ssr")]
static CONFIG: OnceLock<FinderConfig> = OnceLock::new();
#[cfg(feature = "ssr")]
static PLACES: OnceLock<GooglePlacesClient> = OnceLock::new();
#[cfg(feature = "ssr")]
static DIRECTIONS: OnceLock<GoogleDirectionsClient> = OnceLock::new();

/// Stores the config and builds the Google clients. The config is kept even
/// when the API key is missing so the rest of the site still works.
#[cfg(feature = "ssr")]
pub fn init_clients(config: FinderConfig) -> Result<(), ConfigError> {
    let places = GooglePlacesClient::new(&config);
    let directions = GoogleDirectionsClient::new(&config);
    let _ = CONFIG.set(config);

    let _ = PLACES.set(places?);
    let _ = DIRECTIONS.set(directions?);
    Ok(())
}

#[cfg(feature = "ssr")]
pub fn config() -> &'static FinderConfig {
    CONFIG.get_or_init(FinderConfig::from_env)
}

#[cfg(feature = "ssr")]
pub fn places_client() -> Result<&'static GooglePlacesClient, ConfigError> {
    PLACES
        .get()
        .ok_or(ConfigError::Missing("GOOGLE_MAPS_API_KEY"))
}

#[cfg(feature = "ssr")]
pub fn directions_client() -> Result<&'static GoogleDirectionsClient, ConfigError> {
    DIRECTIONS
        .get()
        .ok_or(ConfigError::Missing("GOOGLE_MAPS_API_KEY"))
}
