use leptos::prelude::*;
use shared_types::{directions_link, Coordinate, Place, Route, TravelMode};
use thaw::{Label, LabelSize};

#[component]
pub fn PlaceInfo<F>(
    place: Place,
    origin: Option<Coordinate>,
    route: Option<Route>,
    on_close: F,
) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    let link = origin.map(|origin| directions_link(origin, place.coordinate, TravelMode::Driving));
    let hours = place
        .opening_hours
        .clone()
        .map(|hours| hours.weekday_text)
        .unwrap_or_default();
    let name = place.name.clone();

    view! {
        <div class="info-window">
            <button class="info-window__close" title="Close" on:click=move |_| on_close()>
                "✕"
            </button>
            <Label size=LabelSize::Large>{name}</Label>
            <p><strong>"Type: "</strong>{place.category.label()}</p>
            <p><strong>"Specialization: "</strong>{place.specialization_label()}</p>
            <p><strong>"Address: "</strong>{place.address.clone()}</p>
            {place.phone.clone().map(|phone| view! {
                <p><strong>"Phone: "</strong>{phone}</p>
            })}
            {place.website.clone().map(|website| {
                let href = website.clone();
                view! {
                <p>
                    <strong>"Website: "</strong>
                    <a href=href target="_blank" rel="noopener noreferrer">{website}</a>
                </p>
                }
            })}
            {(!hours.is_empty()).then(|| view! {
                <ul class="info-window__hours">
                    {hours.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
            })}
            {route.map(|route| view! {
                <p class="info-window__route">
                    {format!("{} · {}", route.distance_label(), route.duration_label())}
                </p>
            })}
            {link.map(|href| view! {
                <a
                    href=href
                    target="_blank"
                    rel="noopener noreferrer"
                    class="map-direction-link"
                >
                    "📍 Get Directions in Google Maps"
                </a>
            })}
        </div>
    }
}
