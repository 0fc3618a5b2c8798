//! Nearby hospital and pharmacy lookup for the HealthEase maps page.
//!
//! [`CareFinder`] drives the flow (locate, search, select, route) against
//! injected providers and records the outcome in a [`FinderSession`].

pub mod config;
pub mod error;
pub mod finder;
pub mod providers;
pub mod services;
pub mod session;

pub use config::{FinderConfig, SearchSettings, FALLBACK_LOCATION};
pub use error::{FailureKind, FinderError, LocationFailure, Notice, ProviderError, Severity};
pub use finder::CareFinder;
pub use providers::{DirectionsProvider, GeolocationProvider, PlacesProvider};
pub use session::{FinderSession, LocationFix, Phase, SelectionTicket, SessionStore};

#[cfg(feature = "google")]
pub use services::{google_directions::GoogleDirectionsClient, google_places::GooglePlacesClient};
