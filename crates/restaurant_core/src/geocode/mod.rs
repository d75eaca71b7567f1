//! Address enrichment through an external place-search service.
//!
//! # Responsibility
//! - Turn a structured `Address` into a free-text place query.
//! - Map the top-ranked candidate onto a `Location` and timezone name.
//!
//! # Invariants
//! - Zero candidates is a normal outcome: empty `Location`, empty timezone.
//! - The geocode string is `"<lat>,<lon>"` built from a `[lon, lat]` point.
//! - Backend failures never yield a partial `Location`.

use crate::model::restaurant::{Address, Location};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod http;
pub mod place_search;

pub use http::{HttpPlaceSearchConfig, HttpPlaceSearcher};
pub use place_search::{
    Place, PlaceGeometry, PlaceSearchRequest, PlaceSearchResponse, PlaceSearcher, SearchResult,
    TimeZone,
};

/// Candidate cap sent with every place search.
pub const MAX_RESULTS: u32 = 10;

/// Resolver failure. `Display` passes the underlying message through.
#[derive(Debug)]
pub enum GeocodeError {
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    Decode(serde_json::Error),
    /// Failure reported by a non-HTTP backend.
    Backend(String),
}

impl Display for GeocodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Status { status, body } => {
                write!(f, "place search failed with status {status}: {body}")
            }
            Self::Decode(err) => write!(f, "error decoding place search response: {err}"),
            Self::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl Error for GeocodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Status { .. } | Self::Backend(_) => None,
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for GeocodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Address resolver used by the service before writes.
pub trait Geocoder {
    /// Returns the resolved location and timezone name for `address`.
    fn geocode(&self, address: &Address) -> Result<(Location, String), GeocodeError>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn geocode(&self, address: &Address) -> Result<(Location, String), GeocodeError> {
        (**self).geocode(address)
    }
}

/// Geocoder backed by a place index on a `PlaceSearcher`.
pub struct LocationService<C: PlaceSearcher> {
    client: C,
    place_index: String,
}

impl<C: PlaceSearcher> LocationService<C> {
    pub fn new(client: C, place_index: impl Into<String>) -> Self {
        Self {
            client,
            place_index: place_index.into(),
        }
    }
}

impl<C: PlaceSearcher> Geocoder for LocationService<C> {
    fn geocode(&self, address: &Address) -> Result<(Location, String), GeocodeError> {
        let text = address_query_text(address);
        info!("event=geocode module=geocode status=start text={text:?}");

        let request = PlaceSearchRequest {
            index_name: self.place_index.clone(),
            text,
            max_results: MAX_RESULTS,
        };
        let data = self.client.search_place_index_for_text(&request)?;

        let Some(place) = data.results.into_iter().next().and_then(|result| result.place) else {
            info!("event=geocode module=geocode status=no_match");
            return Ok((Location::default(), String::new()));
        };

        let (location, timezone_name) = location_from_place(place);
        debug!(
            "event=geocode module=geocode status=ok geocode={:?} timezone={timezone_name:?}",
            location.geocode
        );
        Ok((location, timezone_name))
    }
}

/// Joins present postal fields with single spaces in resolver order.
///
/// Absent fields are skipped and no trailing space is appended after the
/// last field. Place search tokenizes free text, so this matches a query
/// built with a separator after every field.
pub fn address_query_text(address: &Address) -> String {
    address
        .postal_fields()
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a `[lon, lat]` point as `"<lat>,<lon>"` with six decimals.
pub fn format_geocode(point: &[f64]) -> Option<String> {
    match point {
        [lon, lat, ..] => Some(format!("{lat:.6},{lon:.6}")),
        _ => None,
    }
}

fn location_from_place(place: Place) -> (Location, String) {
    let geocode = place
        .geometry
        .as_ref()
        .and_then(|geometry| format_geocode(&geometry.point));
    let timezone_name = place
        .time_zone
        .and_then(|time_zone| time_zone.name)
        .unwrap_or_default();

    let location = Location {
        geocode,
        address_number: place.address_number,
        street: place.street,
        municipality: place.municipality,
        postal_code: place.postal_code,
        region: place.region,
        sub_region: place.sub_region,
        country: place.country,
    };
    (location, timezone_name)
}
