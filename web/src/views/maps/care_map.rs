use care_finder::{FinderSession, Phase};
use leptos::{prelude::*, task::spawn_local};
use shared_types::Place;

use crate::{
    components::status::{LoadingView, NoticeBar},
    providers::{browser_finder, SignalSession},
    views::maps::{map_renderer::MapRenderer, place_info::PlaceInfo},
};

#[component]
pub fn NearbyCarePage() -> impl IntoView {
    let session = RwSignal::new(FinderSession::new());
    let store = SignalSession(session);

    // Runs once, in the browser only.
    Effect::new(move |_| {
        spawn_local(async move {
            let finder = browser_finder();
            finder.mount(&store).await;
            finder.search_when_ready(&store).await;
        });
    });

    let on_select = move |place: Place| {
        spawn_local(async move {
            browser_finder().select(&store, place).await;
        });
    };
    let on_close = move || browser_finder().dismiss(&store);

    let notice = Memo::new(move |_| session.with(|s| s.notice().cloned()));
    let phase = Memo::new(move |_| session.with(|s| s.phase()));

    view! {
        <div class="map-page">
            <div class="map-header">
                <h1 class="map-title">"Nearby Hospitals & Pharmacies"</h1>
                {move || notice.get().map(|notice| view! { <NoticeBar notice=notice /> })}
            </div>

            <div class="map-container">
                <MapRenderer session=session on_select=on_select />

                {move || match phase.get() {
                    Phase::Unlocated => view! {
                        <div class="map-overlay">
                            <LoadingView message="Finding your location..." />
                        </div>
                    }.into_any(),
                    Phase::Searching => view! {
                        <div class="map-overlay">
                            <LoadingView message="Searching nearby care..." />
                        </div>
                    }.into_any(),
                    _ => ().into_any(),
                }}

                {move || {
                    session
                        .with(|s| {
                            s.selected_place()
                                .cloned()
                                .map(|place| (place, s.user_location(), s.route().cloned()))
                        })
                        .map(|(place, origin, route)| view! {
                            <PlaceInfo place=place origin=origin route=route on_close=on_close />
                        })
                }}
            </div>

            <div class="map-legend">
                <span class="legend hospital">"🔴 Hospital"</span>
                <span class="legend pharmacy">"🟢 Pharmacy"</span>
                <span class="legend user">"🔵 You"</span>
            </div>
        </div>
    }
}
