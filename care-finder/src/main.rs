use std::{cell::RefCell, env};

use anyhow::{bail, Context};
use care_finder::{
    providers::EnvGeolocation, CareFinder, FinderConfig, FinderSession, GoogleDirectionsClient,
    GooglePlacesClient,
};
use dotenv::dotenv;
use shared_types::{directions_link, Place};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Finder = CareFinder<EnvGeolocation, GooglePlacesClient, GoogleDirectionsClient>;

enum FinderAction {
    Nearby,
    Details,
    Route,
}

impl FinderAction {
    fn new(action: &str) -> anyhow::Result<Self> {
        match action {
            "NEARBY" => Ok(Self::Nearby),
            "DETAILS" => Ok(Self::Details),
            "ROUTE" => Ok(Self::Route),
            other => bail!("Invalid action {other}, expected NEARBY, DETAILS or ROUTE"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,care_finder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let action = env::var("ACTION").unwrap_or_else(|_| "NEARBY".to_string());
    let config = FinderConfig::from_env();
    let finder = CareFinder::new(
        EnvGeolocation,
        GooglePlacesClient::new(&config)?,
        GoogleDirectionsClient::new(&config)?,
        config.search,
    );

    match FinderAction::new(&action)? {
        FinderAction::Nearby => nearby(&finder).await,
        FinderAction::Details => details(&finder).await,
        FinderAction::Route => route(&finder).await,
    }
}

/// Locates and searches. The CLI has no map surface, so it is ready at once.
async fn populate(finder: &Finder) -> RefCell<FinderSession> {
    let session = RefCell::new(FinderSession::new());
    finder.mount(&session).await;
    session.borrow_mut().mark_map_ready();
    finder.search_when_ready(&session).await;

    if let Some(notice) = session.borrow().notice() {
        eprintln!("{:?}: {}", notice.severity, notice.message);
    }
    session
}

fn print_place(place: &Place) {
    println!(
        "[{}] {} ({})\n    {}\n    {}",
        place.category.label(),
        place.name,
        place.id,
        place.address,
        place.specialization_label()
    );
    if let Some(phone) = &place.phone {
        println!("    phone: {}", phone);
    }
    if let Some(website) = &place.website {
        println!("    web: {}", website);
    }
}

async fn nearby(finder: &Finder) -> anyhow::Result<()> {
    let session = populate(finder).await;
    let session = session.borrow();
    let origin = session.user_location().context("no search origin")?;

    println!("{} places near {}", session.places().len(), origin);
    session.places().iter().for_each(print_place);
    Ok(())
}

async fn details(finder: &Finder) -> anyhow::Result<()> {
    let place_id = env::var("PLACE_ID").context("PLACE_ID must be set for DETAILS")?;
    let Some(details) = finder.lookup_details(&place_id).await else {
        bail!("No details for {place_id}");
    };

    println!("{}", details.name.as_deref().unwrap_or(&place_id));
    for (label, value) in [
        ("address", &details.formatted_address),
        ("phone", &details.phone),
        ("web", &details.website),
    ] {
        if let Some(value) = value {
            println!("    {}: {}", label, value);
        }
    }
    if let Some(hours) = &details.opening_hours {
        hours
            .weekday_text
            .iter()
            .for_each(|line| println!("    {}", line));
    }
    Ok(())
}

async fn route(finder: &Finder) -> anyhow::Result<()> {
    let place_id = env::var("PLACE_ID").context("PLACE_ID must be set for ROUTE")?;
    let session = populate(finder).await;

    let place = session
        .borrow()
        .places()
        .iter()
        .find(|p| p.id == place_id)
        .cloned()
        .with_context(|| format!("{place_id} is not among the nearby places"))?;

    finder.select(&session, place).await;

    let session = session.borrow();
    let (Some(selected), Some(origin)) = (session.selected_place(), session.user_location())
    else {
        bail!("Selection for {place_id} was lost");
    };
    print_place(selected);

    match session.route() {
        Some(route) => println!(
            "Route via {}: {}, {}",
            route.summary,
            route.distance_label(),
            route.duration_label()
        ),
        None => println!("No driving route available"),
    }
    println!(
        "{}",
        directions_link(origin, selected.coordinate, finder.settings().travel_mode)
    );
    Ok(())
}
