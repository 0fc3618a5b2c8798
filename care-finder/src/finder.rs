use futures::future::try_join;
use shared_types::{Coordinate, Place, PlaceCategory, PlaceDetails, Route, DETAIL_FIELDS};

use crate::config::SearchSettings;
use crate::error::FinderError;
use crate::providers::{DirectionsProvider, GeolocationProvider, PlacesProvider};
use crate::session::{LocationFix, SessionStore};

/// Looks up hospitals and pharmacies around the user and routes to the one
/// they pick. Holds the injected providers; session state lives in a
/// [`SessionStore`] owned by the caller.
pub struct CareFinder<G, P, D> {
    geolocation: G,
    places: P,
    directions: D,
    settings: SearchSettings,
}

impl<G, P, D> CareFinder<G, P, D>
where
    G: GeolocationProvider,
    P: PlacesProvider,
    D: DirectionsProvider,
{
    pub fn new(geolocation: G, places: P, directions: D, settings: SearchSettings) -> Self {
        Self {
            geolocation,
            places,
            directions,
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// One-shot position request. Any failure falls back to the configured
    /// coordinate so a search origin always exists.
    pub async fn locate(&self) -> LocationFix {
        match self.geolocation.current_position().await {
            Ok(coordinate) => LocationFix {
                coordinate,
                failure: None,
            },
            Err(failure) => LocationFix {
                coordinate: self.settings.fallback,
                failure: Some(FinderError::LocationUnavailable(failure)),
            },
        }
    }

    /// Hospitals then pharmacies around `origin`. Both searches run at once
    /// and either one failing fails the whole lookup.
    pub async fn search_nearby(&self, origin: Coordinate) -> Result<Vec<Place>, FinderError> {
        let (mut hospitals, pharmacies) = try_join(
            self.search_category(origin, PlaceCategory::Hospital),
            self.search_category(origin, PlaceCategory::Pharmacy),
        )
        .await?;

        hospitals.extend(pharmacies);
        Ok(hospitals)
    }

    async fn search_category(
        &self,
        origin: Coordinate,
        category: PlaceCategory,
    ) -> Result<Vec<Place>, FinderError> {
        let places = self
            .places
            .nearby_search(origin, self.settings.radius_meters, category)
            .await
            .map_err(|source| FinderError::SearchFailed { category, source })?;

        Ok(places
            .into_iter()
            .map(|place| Place { category, ..place })
            .collect())
    }

    /// Details for a place, or `None` if the lookup failed.
    pub async fn lookup_details(&self, place_id: &str) -> Option<PlaceDetails> {
        match self.places.place_details(place_id, &DETAIL_FIELDS).await {
            Ok(details) => Some(details),
            Err(source) => {
                FinderError::DetailsUnavailable {
                    place_id: place_id.to_string(),
                    source,
                }
                .log();
                None
            }
        }
    }

    pub async fn route_to(&self, origin: Coordinate, place: &Place) -> Result<Route, FinderError> {
        self.directions
            .route(origin, place.coordinate, self.settings.travel_mode)
            .await
            .map_err(|source| FinderError::RouteFailed {
                place_id: place.id.clone(),
                source,
            })
    }

    /// Acquires the user's position and records it in the session.
    pub async fn mount<S: SessionStore>(&self, session: &S) {
        let fix = self.locate().await;
        session.update(|s| s.apply_location(fix));
    }

    /// Runs the nearby search if the session is ready for it. Returns
    /// `false` when it was not ready or the search already ran.
    pub async fn search_when_ready<S: SessionStore>(&self, session: &S) -> bool {
        let Some(origin) = session.update(|s| s.begin_search()) else {
            return false;
        };

        let result = self.search_nearby(origin).await;
        match &result {
            Ok(places) => tracing::info!(count = places.len(), "nearby places loaded"),
            Err(_) => tracing::info!("nearby search failed"),
        }
        session.update(|s| s.apply_search(result))
    }

    /// Selects `place`, enriches it and routes to it. Returns `false` if a
    /// newer selection or a dismiss superseded this one along the way.
    pub async fn select<S: SessionStore>(&self, session: &S, place: Place) -> bool {
        let ticket = session.update(|s| s.begin_selection(place));

        let details = self.lookup_details(&ticket.place().id).await;
        if !session.update(|s| s.apply_details(&ticket, details)) {
            return false;
        }

        let Some(origin) = ticket.origin() else {
            return true;
        };

        let result = self.route_to(origin, ticket.place()).await;
        session.update(|s| s.apply_route(&ticket, result))
    }

    pub fn dismiss<S: SessionStore>(&self, session: &S) {
        session.update(|s| s.dismiss());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FALLBACK_LOCATION;
    use crate::error::{FailureKind, LocationFailure, ProviderError, Severity};
    use crate::providers::FixedGeolocation;
    use crate::session::{FinderSession, Phase};
    use futures::channel::oneshot;
    use shared_types::TravelMode;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const HOME: Coordinate = Coordinate::new(40.7306, -73.9866);

    fn place(id: &str, category: PlaceCategory, lat: f64) -> Place {
        Place {
            id: id.to_string(),
            name: format!("Place {}", id),
            coordinate: Coordinate::new(lat, -73.99),
            address: format!("{} Search Ave", id),
            category,
            specialization: vec![category.as_str().to_string(), "health".to_string()],
            phone: None,
            website: None,
            opening_hours: None,
        }
    }

    #[derive(Default)]
    struct FakePlaces {
        results: HashMap<PlaceCategory, Result<Vec<Place>, ProviderError>>,
        details: HashMap<String, PlaceDetails>,
        gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
        searched: RefCell<Vec<(PlaceCategory, u32)>>,
    }

    impl FakePlaces {
        fn with_results(hospitals: Vec<Place>, pharmacies: Vec<Place>) -> Self {
            let mut fake = Self::default();
            fake.results.insert(PlaceCategory::Hospital, Ok(hospitals));
            fake.results.insert(PlaceCategory::Pharmacy, Ok(pharmacies));
            fake
        }

        /// Holds the details lookup for `place_id` until the sender fires.
        fn gate(&self, place_id: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().insert(place_id.to_string(), rx);
            tx
        }
    }

    impl PlacesProvider for FakePlaces {
        async fn nearby_search(
            &self,
            _origin: Coordinate,
            radius_meters: u32,
            category: PlaceCategory,
        ) -> Result<Vec<Place>, ProviderError> {
            self.searched.borrow_mut().push((category, radius_meters));
            self.results
                .get(&category)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn place_details(
            &self,
            place_id: &str,
            fields: &[&str],
        ) -> Result<PlaceDetails, ProviderError> {
            assert!(fields.contains(&"formatted_phone_number"));
            let gate = self.gates.borrow_mut().remove(place_id);
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.details
                .get(place_id)
                .cloned()
                .ok_or_else(|| ProviderError::Status("NOT_FOUND".to_string()))
        }
    }

    #[derive(Default)]
    struct FakeDirections {
        fail: bool,
        requested: RefCell<Vec<Coordinate>>,
    }

    impl DirectionsProvider for FakeDirections {
        async fn route(
            &self,
            origin: Coordinate,
            destination: Coordinate,
            mode: TravelMode,
        ) -> Result<Route, ProviderError> {
            self.requested.borrow_mut().push(destination);
            if self.fail {
                return Err(ProviderError::Status("ZERO_RESULTS".to_string()));
            }
            Ok(Route {
                origin,
                destination,
                travel_mode: mode,
                summary: "test".to_string(),
                distance_meters: 1000,
                duration_seconds: 120,
                path: vec![origin, destination],
            })
        }
    }

    fn finder(
        position: Option<Coordinate>,
        places: FakePlaces,
        route_fails: bool,
    ) -> CareFinder<FixedGeolocation, FakePlaces, FakeDirections> {
        CareFinder::new(
            FixedGeolocation(position),
            places,
            FakeDirections {
                fail: route_fails,
                ..Default::default()
            },
            SearchSettings::default(),
        )
    }

    async fn ready_session<G, P, D>(finder: &CareFinder<G, P, D>) -> RefCell<FinderSession>
    where
        G: GeolocationProvider,
        P: PlacesProvider,
        D: DirectionsProvider,
    {
        let session = RefCell::new(FinderSession::new());
        finder.mount(&session).await;
        session.borrow_mut().mark_map_ready();
        assert!(finder.search_when_ready(&session).await);
        session
    }

    #[tokio::test]
    async fn geolocation_failure_uses_fallback() {
        let finder = finder(None, FakePlaces::default(), false);
        let session = RefCell::new(FinderSession::new());
        finder.mount(&session).await;

        let session = session.borrow();
        assert_eq!(session.user_location(), Some(FALLBACK_LOCATION));
        let notice = session.notice().expect("warning should be set");
        assert_eq!(notice.kind, FailureKind::Location);
        assert_eq!(notice.severity, Severity::Warning);
    }

    #[tokio::test]
    async fn locate_reports_failure_reason() {
        struct Denied;
        impl GeolocationProvider for Denied {
            async fn current_position(&self) -> Result<Coordinate, LocationFailure> {
                Err(LocationFailure::PermissionDenied)
            }
        }

        let finder = CareFinder::new(
            Denied,
            FakePlaces::default(),
            FakeDirections::default(),
            SearchSettings::default(),
        );
        let fix = finder.locate().await;
        assert_eq!(fix.coordinate, FALLBACK_LOCATION);
        assert_eq!(
            fix.failure,
            Some(FinderError::LocationUnavailable(
                LocationFailure::PermissionDenied
            ))
        );
    }

    #[tokio::test]
    async fn search_waits_for_map() {
        let finder = finder(Some(HOME), FakePlaces::default(), false);
        let session = RefCell::new(FinderSession::new());
        finder.mount(&session).await;

        assert!(!finder.search_when_ready(&session).await);
        assert!(finder.places.searched.borrow().is_empty());
        assert_eq!(session.borrow().phase(), Phase::Located);
    }

    #[tokio::test]
    async fn concatenates_both_categories() {
        let places = FakePlaces::with_results(
            vec![
                place("h1", PlaceCategory::Hospital, 40.73),
                place("h2", PlaceCategory::Hospital, 40.74),
            ],
            vec![
                place("p1", PlaceCategory::Pharmacy, 40.75),
                place("p2", PlaceCategory::Pharmacy, 40.76),
                place("p3", PlaceCategory::Pharmacy, 40.77),
            ],
        );
        let finder = finder(Some(HOME), places, false);
        let session = ready_session(&finder).await;

        let session = session.borrow();
        let categories: Vec<_> = session.places().iter().map(|p| p.category).collect();
        assert_eq!(
            categories,
            vec![
                PlaceCategory::Hospital,
                PlaceCategory::Hospital,
                PlaceCategory::Pharmacy,
                PlaceCategory::Pharmacy,
                PlaceCategory::Pharmacy,
            ]
        );
        assert!(session.notice().is_none());
        assert_eq!(session.phase(), Phase::Populated);

        let searched = finder.places.searched.borrow();
        assert_eq!(searched.len(), 2);
        assert!(searched.iter().all(|(_, radius)| *radius == 5000));
    }

    #[tokio::test]
    async fn results_are_tagged_with_searched_category() {
        // A result that the directory tagged differently still belongs to the
        // category it was searched under.
        let places = FakePlaces::with_results(
            vec![place("x", PlaceCategory::Pharmacy, 40.73)],
            vec![],
        );
        let finder = finder(Some(HOME), places, false);
        let session = ready_session(&finder).await;
        assert_eq!(
            session.borrow().places()[0].category,
            PlaceCategory::Hospital
        );
    }

    #[tokio::test]
    async fn one_failed_category_discards_everything() {
        let mut places = FakePlaces::default();
        places.results.insert(
            PlaceCategory::Hospital,
            Ok(vec![place("h1", PlaceCategory::Hospital, 40.73)]),
        );
        places.results.insert(
            PlaceCategory::Pharmacy,
            Err(ProviderError::Transport("connection reset".to_string())),
        );
        let finder = finder(Some(HOME), places, false);
        let session = ready_session(&finder).await;

        let session = session.borrow();
        assert!(session.places().is_empty());
        assert_eq!(
            session.notice().map(|n| n.message.as_str()),
            Some("Could not fetch nearby hospitals and pharmacies.")
        );
    }

    #[tokio::test]
    async fn hospital_failure_also_discards_pharmacies() {
        let mut places = FakePlaces::default();
        places.results.insert(
            PlaceCategory::Hospital,
            Err(ProviderError::Status("OVER_QUERY_LIMIT".to_string())),
        );
        places.results.insert(
            PlaceCategory::Pharmacy,
            Ok(vec![place("p1", PlaceCategory::Pharmacy, 40.73)]),
        );
        let finder = finder(Some(HOME), places, false);

        let err = finder.search_nearby(HOME).await.unwrap_err();
        assert!(matches!(
            err,
            FinderError::SearchFailed {
                category: PlaceCategory::Hospital,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn select_enriches_and_routes() {
        let hospital = place("h1", PlaceCategory::Hospital, 40.74);
        let mut places = FakePlaces::with_results(vec![hospital.clone()], vec![]);
        places.details.insert(
            "h1".to_string(),
            PlaceDetails {
                phone: Some("(212) 555-0100".to_string()),
                formatted_address: Some("1 Search Ave, New York, NY".to_string()),
                website: Some("https://h1.example".to_string()),
                ..Default::default()
            },
        );
        let finder = finder(Some(HOME), places, false);
        let session = ready_session(&finder).await;

        assert!(finder.select(&session, hospital.clone()).await);

        let state = session.borrow();
        let selected = state.selected_place().unwrap();
        assert_eq!(selected.id, "h1");
        assert_eq!(selected.phone.as_deref(), Some("(212) 555-0100"));
        assert_eq!(selected.address, "1 Search Ave, New York, NY");
        let route = state.route().unwrap();
        assert_eq!(route.origin, HOME);
        assert_eq!(route.destination, hospital.coordinate);
        assert_eq!(route.travel_mode, TravelMode::Driving);
        assert_eq!(state.phase(), Phase::Routed);
        drop(state);

        finder.dismiss(&session);
        let state = session.borrow();
        assert!(state.selected_place().is_none());
        assert!(state.route().is_none());
    }

    #[tokio::test]
    async fn missing_details_keep_search_fields() {
        let pharmacy = place("p1", PlaceCategory::Pharmacy, 40.75);
        let places = FakePlaces::with_results(vec![], vec![pharmacy.clone()]);
        let finder = finder(Some(HOME), places, false);
        let session = ready_session(&finder).await;

        assert!(finder.select(&session, pharmacy.clone()).await);

        let state = session.borrow();
        let selected = state.selected_place().unwrap();
        assert_eq!(selected.address, pharmacy.address);
        assert_eq!(selected.phone, None);
        assert_eq!(selected.website, None);
        assert!(state.notice().is_none(), "details failures are silent");
    }

    #[tokio::test]
    async fn route_failure_leaves_no_route() {
        let pharmacy = place("p1", PlaceCategory::Pharmacy, 40.75);
        let places = FakePlaces::with_results(vec![], vec![pharmacy.clone()]);
        let finder = finder(Some(HOME), places, true);
        let session = ready_session(&finder).await;

        assert!(finder.select(&session, pharmacy).await);

        let state = session.borrow();
        assert!(state.selected_place().is_some());
        assert!(state.route().is_none());
        assert_eq!(state.notice().unwrap().kind, FailureKind::Route);
        assert_eq!(state.phase(), Phase::Selected);
    }

    #[tokio::test]
    async fn latest_selection_wins() {
        let a = place("a", PlaceCategory::Hospital, 40.74);
        let b = place("b", PlaceCategory::Pharmacy, 40.76);
        let mut places = FakePlaces::with_results(vec![a.clone()], vec![b.clone()]);
        places.details.insert(
            "a".to_string(),
            PlaceDetails {
                phone: Some("111".to_string()),
                ..Default::default()
            },
        );
        places.details.insert(
            "b".to_string(),
            PlaceDetails {
                phone: Some("222".to_string()),
                ..Default::default()
            },
        );
        let finder = finder(Some(HOME), places, false);
        let session = ready_session(&finder).await;

        let release_a = finder.places.gate("a");
        let select_a = finder.select(&session, a);
        let select_b = async {
            let applied = finder.select(&session, b.clone()).await;
            release_a.send(()).unwrap();
            applied
        };
        let (applied_a, applied_b) = futures::join!(select_a, select_b);

        assert!(!applied_a);
        assert!(applied_b);
        let state = session.borrow();
        let selected = state.selected_place().unwrap();
        assert_eq!(selected.id, "b");
        assert_eq!(selected.phone.as_deref(), Some("222"));
        assert_eq!(state.route().unwrap().destination, b.coordinate);
        assert_eq!(*finder.directions.requested.borrow(), vec![b.coordinate]);
    }
}
