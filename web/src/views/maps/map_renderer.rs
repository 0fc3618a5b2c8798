use care_finder::{FinderSession, SessionStore, FALLBACK_LOCATION};
use leptos::{prelude::*, task::spawn_local};
use leptos_leaflet::{leaflet::Map, prelude::*};
use shared_types::Place;

use crate::{
    providers::{browser_finder, SignalSession},
    views::maps::place_marker::{pin_icon, PlaceMarker, USER_FILL},
};

#[component]
pub fn MapRenderer<F>(session: RwSignal<FinderSession>, on_select: F) -> impl IntoView
where
    F: Fn(Place) + Copy + Send + Sync + 'static,
{
    let store = SignalSession(session);
    let map: JsRwSignal<Option<Map>> = JsRwSignal::new_local(None::<Map>);

    let center: Memo<Position> = Memo::new(move |_| {
        let coordinate = session
            .with(|s| s.user_location())
            .unwrap_or(FALLBACK_LOCATION);
        Position::new(coordinate.lat, coordinate.lng)
    });

    Effect::new(move |_| {
        let new_pos = center.get();
        if let Some(map) = map.get_untracked() {
            map.set_view(&new_pos.as_lat_lng(), map.get_zoom());
        }
    });

    // The map handle showing up is the ready signal; nothing is searched before it.
    Effect::new(move |_| {
        if map.get().is_none() || store.read(|s| s.map_ready()) {
            return;
        }
        store.update(|s| s.mark_map_ready());
        spawn_local(async move {
            browser_finder().search_when_ready(&store).await;
        });
    });

    let user_location = Memo::new(move |_| session.with(|s| s.user_location()));
    let places = Memo::new(move |_| session.with(|s| s.places().to_vec()));
    let route_path = Memo::new(move |_| {
        session.with(|s| {
            s.route().map(|route| {
                route
                    .path
                    .iter()
                    .map(|c| Position::new(c.lat, c.lng))
                    .collect::<Vec<_>>()
            })
        })
    });

    view! {
        <MapContainer
            style="height: 80vh; width: 100%"
            center=center.get_untracked()
            zoom=14.0
            set_view=true
            map=map.write_only()
        >
            <TileLayer
                url="https://tile.openstreetmap.org/{z}/{x}/{y}.png"
                attribution="&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            />
            {move || user_location.get().map(|coordinate| view! {
                <Marker
                    position=Position::new(coordinate.lat, coordinate.lng)
                    draggable=false
                    icon_url=Some(pin_icon(USER_FILL))
                    icon_size=Some((28.0, 42.0))
                    icon_anchor=Some((14.0, 42.0))
                >
                    <Popup>"Your Location"</Popup>
                </Marker>
            })}
            {move || places
                .get()
                .into_iter()
                .map(|place| view! { <PlaceMarker place=place on_select=on_select /> })
                .collect_view()}
            {move || route_path.get().map(|positions| view! {
                <Polyline positions=positions color="#4F46E5" weight=5.0 />
            })}
        </MapContainer>
    }
}
