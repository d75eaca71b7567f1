use restaurant_core::geocode::{
    Place, PlaceGeometry, PlaceSearchRequest, PlaceSearchResponse, SearchResult, TimeZone,
    MAX_RESULTS,
};
use restaurant_core::{Address, GeocodeError, Geocoder, Location, LocationService, PlaceSearcher};
use std::cell::RefCell;

/// Echoes address components parsed back out of the submitted text.
///
/// Expects text shaped like `"123 street city state zip country"`.
#[derive(Default)]
struct EchoSearcher {
    error: Option<String>,
    empty: bool,
    without_timezone: bool,
    requests: RefCell<Vec<PlaceSearchRequest>>,
}

impl PlaceSearcher for EchoSearcher {
    fn search_place_index_for_text(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<PlaceSearchResponse, GeocodeError> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(message) = &self.error {
            return Err(GeocodeError::Backend(message.clone()));
        }
        if self.empty {
            return Ok(PlaceSearchResponse::default());
        }

        let words: Vec<String> = request.text.split(' ').map(str::to_string).collect();
        let time_zone = (!self.without_timezone).then(|| TimeZone {
            name: Some("timezone".to_string()),
            offset: Some(0),
        });
        let place = Place {
            geometry: Some(PlaceGeometry {
                point: vec![456.0, 123.0],
            }),
            address_number: Some(words[0].clone()),
            street: Some(words[1].clone()),
            municipality: Some(words[2].clone()),
            region: Some(words[3].clone()),
            sub_region: Some(format!("sub{}", words[3])),
            postal_code: Some(words[4].clone()),
            country: Some(words[5].clone()),
            time_zone,
            ..Place::default()
        };
        let second = Place {
            address_number: Some("999".to_string()),
            ..Place::default()
        };

        Ok(PlaceSearchResponse {
            results: vec![
                SearchResult {
                    place: Some(place),
                    relevance: Some(1.0),
                },
                SearchResult {
                    place: Some(second),
                    relevance: Some(0.5),
                },
            ],
        })
    }
}

fn address() -> Address {
    Address {
        line1: Some("123 street".to_string()),
        city: Some("city".to_string()),
        state: Some("state".to_string()),
        zip_code: Some("zip".to_string()),
        country: Some("country".to_string()),
        ..Address::default()
    }
}

#[test]
fn geocode_maps_top_candidate() {
    let searcher = EchoSearcher::default();
    let service = LocationService::new(&searcher, "RestaurantIndex");

    let (location, timezone_name) = service.geocode(&address()).unwrap();

    assert_eq!(
        location,
        Location {
            geocode: Some("123.000000,456.000000".to_string()),
            address_number: Some("123".to_string()),
            street: Some("street".to_string()),
            municipality: Some("city".to_string()),
            postal_code: Some("zip".to_string()),
            region: Some("state".to_string()),
            sub_region: Some("substate".to_string()),
            country: Some("country".to_string()),
        }
    );
    assert_eq!(timezone_name, "timezone");
}

#[test]
fn geocode_sends_ordered_text_index_and_cap() {
    let searcher = EchoSearcher::default();
    let service = LocationService::new(&searcher, "RestaurantIndex");

    service.geocode(&address()).unwrap();

    let requests = searcher.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, "123 street city state zip country");
    assert_eq!(requests[0].index_name, "RestaurantIndex");
    assert_eq!(requests[0].max_results, MAX_RESULTS);
    assert_eq!(MAX_RESULTS, 10);
}

#[test]
fn geocode_with_no_candidates_returns_empty_location() {
    let searcher = EchoSearcher {
        empty: true,
        ..EchoSearcher::default()
    };
    let service = LocationService::new(&searcher, "RestaurantIndex");

    let (location, timezone_name) = service.geocode(&address()).unwrap();

    assert_eq!(location, Location::default());
    assert_eq!(timezone_name, "");
}

#[test]
fn geocode_without_timezone_returns_empty_name() {
    let searcher = EchoSearcher {
        without_timezone: true,
        ..EchoSearcher::default()
    };
    let service = LocationService::new(&searcher, "RestaurantIndex");

    let (location, timezone_name) = service.geocode(&address()).unwrap();

    assert!(location.geocode.is_some());
    assert_eq!(timezone_name, "");
}

#[test]
fn geocode_passes_backend_error_through() {
    let searcher = EchoSearcher {
        error: Some("an error occurred".to_string()),
        ..EchoSearcher::default()
    };
    let service = LocationService::new(&searcher, "RestaurantIndex");

    let err = service.geocode(&address()).unwrap_err();

    assert_eq!(err.to_string(), "an error occurred");
}
