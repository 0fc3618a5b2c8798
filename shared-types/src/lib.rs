use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Kinds of care facility the finder searches for. The string form is the
/// place type tag understood by the places directory.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Hospital,
    Pharmacy,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 2] = [PlaceCategory::Hospital, PlaceCategory::Pharmacy];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::Hospital => "hospital",
            PlaceCategory::Pharmacy => "pharmacy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaceCategory::Hospital => "Hospital",
            PlaceCategory::Pharmacy => "Pharmacy",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub address: String,
    pub category: PlaceCategory,
    pub specialization: Vec<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<OpeningHours>,
}

impl Place {
    pub fn specialization_label(&self) -> String {
        self.specialization.join(", ")
    }

    /// Overlays the fields of a details lookup onto this place. Empty or
    /// missing values never replace what the search result already had.
    pub fn enrich(&mut self, details: Option<&PlaceDetails>) {
        let Some(details) = details else {
            return;
        };

        if let Some(phone) = non_empty(&details.phone) {
            self.phone = Some(phone);
        }
        if let Some(address) = non_empty(&details.formatted_address) {
            self.address = address;
        }
        if let Some(website) = non_empty(&details.website) {
            self.website = Some(website);
        }
        if details.opening_hours.is_some() {
            self.opening_hours = details.opening_hours.clone();
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Fields requested from the details lookup.
pub const DETAIL_FIELDS: [&str; 6] = [
    "name",
    "formatted_phone_number",
    "formatted_address",
    "types",
    "opening_hours",
    "website",
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub formatted_address: Option<String>,
    pub types: Vec<String>,
    pub opening_hours: Option<OpeningHours>,
    pub website: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Route {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub travel_mode: TravelMode,
    pub summary: String,
    pub distance_meters: u64,
    pub duration_seconds: u64,
    pub path: Vec<Coordinate>,
}

impl Route {
    pub fn distance_label(&self) -> String {
        format!("{:.1} km", self.distance_meters as f64 / 1000.0)
    }

    pub fn duration_label(&self) -> String {
        let minutes = (self.duration_seconds + 59) / 60;
        if minutes < 60 {
            format!("{} min", minutes)
        } else {
            format!("{} h {} min", minutes / 60, minutes % 60)
        }
    }
}

/// Link that opens turn-by-turn directions in the full Google Maps app.
pub fn directions_link(origin: Coordinate, destination: Coordinate, mode: TravelMode) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={}&destination={}&travelmode={}",
        origin,
        destination,
        mode.as_str()
    )
}
