use std::cell::RefCell;

use shared_types::{Coordinate, Place, PlaceDetails, Route};

use crate::error::{FailureKind, FinderError, Notice};

/// Counter bumped on every selection change. Results carry the generation
/// they were requested under and are dropped once it is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SelectionGeneration(u64);

impl SelectionGeneration {
    fn next(self) -> Self {
        SelectionGeneration(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionTicket {
    generation: SelectionGeneration,
    place: Place,
    origin: Option<Coordinate>,
}

impl SelectionTicket {
    pub fn generation(&self) -> SelectionGeneration {
        self.generation
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    InFlight,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unlocated,
    Located,
    Searching,
    Populated,
    Selected,
    Routed,
}

/// Where a location came from: the device, or the fallback after a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub failure: Option<FinderError>,
}

/// Everything the nearby-care view knows. Lives as long as the view does.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FinderSession {
    user_location: Option<Coordinate>,
    places: Vec<Place>,
    selected: Option<Place>,
    route: Option<Route>,
    notice: Option<Notice>,
    route_notice: Option<Notice>,
    map_ready: bool,
    search: SearchStatus,
    generation: SelectionGeneration,
}

impl FinderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn selected_place(&self) -> Option<&Place> {
        self.selected.as_ref()
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// The notice to show: a route failure for the current selection first,
    /// then any session-wide location or search notice.
    pub fn notice(&self) -> Option<&Notice> {
        self.route_notice.as_ref().or(self.notice.as_ref())
    }

    pub fn map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn search_status(&self) -> SearchStatus {
        self.search
    }

    pub fn generation(&self) -> SelectionGeneration {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        if self.user_location.is_none() {
            return Phase::Unlocated;
        }
        if self.selected.is_some() {
            return if self.route.is_some() {
                Phase::Routed
            } else {
                Phase::Selected
            };
        }
        match self.search {
            SearchStatus::Idle => Phase::Located,
            SearchStatus::InFlight => Phase::Searching,
            SearchStatus::Done => Phase::Populated,
        }
    }

    /// Records where the user is. Only the first fix of a session counts.
    pub fn apply_location(&mut self, fix: LocationFix) -> bool {
        if self.user_location.is_some() {
            tracing::debug!("location already known, ignoring new fix");
            return false;
        }
        if let Some(failure) = &fix.failure {
            self.report(failure);
        }
        self.user_location = Some(fix.coordinate);
        true
    }

    pub fn mark_map_ready(&mut self) {
        self.map_ready = true;
    }

    /// Returns the search origin once, as soon as the location is known and
    /// the map is ready.
    pub fn begin_search(&mut self) -> Option<Coordinate> {
        if !self.map_ready || self.search != SearchStatus::Idle {
            return None;
        }
        let origin = self.user_location?;
        self.search = SearchStatus::InFlight;
        Some(origin)
    }

    /// Stores the outcome of the search started by [`Self::begin_search`].
    /// Results arriving with no search in flight are ignored.
    pub fn apply_search(&mut self, result: Result<Vec<Place>, FinderError>) -> bool {
        if self.search != SearchStatus::InFlight {
            tracing::debug!(status = ?self.search, "no search in flight, ignoring results");
            return false;
        }
        self.search = SearchStatus::Done;
        match result {
            Ok(places) => self.places = places,
            Err(err) => {
                self.report(&err);
                self.places.clear();
            }
        }
        true
    }

    /// Makes `place` the one active selection and drops the previous route.
    pub fn begin_selection(&mut self, place: Place) -> SelectionTicket {
        self.generation = self.generation.next();
        self.route = None;
        self.route_notice = None;
        self.selected = Some(place.clone());

        SelectionTicket {
            generation: self.generation,
            place,
            origin: self.user_location,
        }
    }

    pub fn is_current(&self, ticket: &SelectionTicket) -> bool {
        ticket.generation == self.generation && self.selected.is_some()
    }

    /// Applies a details lookup. `None` keeps the search-result fields.
    pub fn apply_details(
        &mut self,
        ticket: &SelectionTicket,
        details: Option<PlaceDetails>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(place_id = %ticket.place.id, "dropping stale details");
            return false;
        }

        let Some(details) = details else {
            return true;
        };

        if let Some(selected) = self.selected.as_mut() {
            selected.enrich(Some(&details));
        }
        if let Some(listed) = self
            .places
            .iter_mut()
            .find(|p| p.id == ticket.place.id && p.category == ticket.place.category)
        {
            listed.enrich(Some(&details));
        }
        true
    }

    pub fn apply_route(
        &mut self,
        ticket: &SelectionTicket,
        result: Result<Route, FinderError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(place_id = %ticket.place.id, "dropping stale route");
            return false;
        }

        match result {
            Ok(route) => self.route = Some(route),
            Err(err) => {
                self.route = None;
                self.report(&err);
            }
        }
        true
    }

    /// Closes the info panel. Any in-flight lookups become stale.
    pub fn dismiss(&mut self) {
        self.generation = self.generation.next();
        self.selected = None;
        self.route = None;
        self.route_notice = None;
    }

    /// Route notices live in their own slot so they never replace a
    /// location or search notice.
    fn report(&mut self, err: &FinderError) {
        err.log();
        let Some(notice) = err.notice() else {
            return;
        };
        match notice.kind {
            FailureKind::Route => self.route_notice = Some(notice),
            _ => self.notice = Some(notice),
        }
    }
}

/// Somewhere a [`FinderSession`] is kept: a `RefCell` here, a reactive
/// signal in the browser. Implementations must not hold the session borrowed
/// across an await.
pub trait SessionStore {
    fn update<R>(&self, f: impl FnOnce(&mut FinderSession) -> R) -> R;

    fn read<R>(&self, f: impl FnOnce(&FinderSession) -> R) -> R;
}

impl SessionStore for RefCell<FinderSession> {
    fn update<R>(&self, f: impl FnOnce(&mut FinderSession) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn read<R>(&self, f: impl FnOnce(&FinderSession) -> R) -> R {
        f(&self.borrow())
    }
}
