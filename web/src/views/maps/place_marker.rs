use leptos::prelude::*;
use leptos_leaflet::prelude::*;
use shared_types::{Place, PlaceCategory};

pub const HOSPITAL_FILL: &str = "%23dc2626";
pub const PHARMACY_FILL: &str = "%2316a34a";
pub const USER_FILL: &str = "%232563eb";

pub fn category_fill(category: PlaceCategory) -> &'static str {
    match category {
        PlaceCategory::Hospital => HOSPITAL_FILL,
        PlaceCategory::Pharmacy => PHARMACY_FILL,
    }
}

/// Map pin as an SVG data url. `fill` must already be url-encoded.
pub fn pin_icon(fill: &str) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='28' height='42' viewBox='0 0 28 42'%3E%3Cpath fill='{}' stroke='%23ffffff' stroke-width='1.5' d='M14 2C8.5 2 4 6.5 4 12c0 8.5 10 26 10 26s10-17.5 10-26c0-5.5-4.5-10-10-10zm0 13.5c-1.9 0-3.5-1.6-3.5-3.5s1.6-3.5 3.5-3.5 3.5 1.6 3.5 3.5-1.6 3.5-3.5 3.5z'/%3E%3C/svg%3E",
        fill
    )
}

#[component]
pub fn PlaceMarker<F>(place: Place, on_select: F) -> impl IntoView
where
    F: Fn(Place) + Copy + Send + Sync + 'static,
{
    let position = Position::new(place.coordinate.lat, place.coordinate.lng);
    let icon = pin_icon(category_fill(place.category));
    let events = MouseEvents::new().on_click(move |_| on_select(place.clone()));

    view! {
        <Marker
            position=position
            draggable=false
            icon_url=Some(icon)
            icon_size=Some((24.0, 36.0))
            icon_anchor=Some((12.0, 36.0))
            mouse_events=events
        />
    }
}
