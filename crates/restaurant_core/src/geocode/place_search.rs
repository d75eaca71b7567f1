//! Place-search backend contract and wire types.
//!
//! The types mirror the Amazon Location `SearchPlaceIndexForText` JSON shape,
//! so the HTTP backend can decode responses directly into them.

use super::GeocodeError;
use serde::{Deserialize, Serialize};

/// Free-text search against one place index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaceSearchRequest {
    /// Sent in the URL path, not the body.
    #[serde(skip)]
    pub index_name: String,
    pub text: String,
    pub max_results: u32,
}

/// Ranked candidates, best match first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaceSearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResult {
    #[serde(default)]
    pub place: Option<Place>,
    #[serde(default)]
    pub relevance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Place {
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub address_number: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub sub_region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub time_zone: Option<TimeZone>,
}

/// Point in `[longitude, latitude]` order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaceGeometry {
    #[serde(default)]
    pub point: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeZone {
    #[serde(default)]
    pub name: Option<String>,
    /// Offset from UTC in seconds.
    #[serde(default)]
    pub offset: Option<i32>,
}

/// External place-search capability.
pub trait PlaceSearcher {
    fn search_place_index_for_text(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<PlaceSearchResponse, GeocodeError>;
}

impl<T: PlaceSearcher + ?Sized> PlaceSearcher for &T {
    fn search_place_index_for_text(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<PlaceSearchResponse, GeocodeError> {
        (**self).search_place_index_for_text(request)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlaceSearchRequest, PlaceSearchResponse};

    #[test]
    fn request_body_omits_index_name() {
        let request = PlaceSearchRequest {
            index_name: "RestaurantIndex".to_string(),
            text: "123 street city".to_string(),
            max_results: 10,
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"Text":"123 street city","MaxResults":10}"#
        );
    }

    #[test]
    fn response_decodes_location_service_shape() {
        let body = r#"{
            "Summary": {"Text": "123 street"},
            "Results": [{
                "Place": {
                    "Geometry": {"Point": [-122.3, 47.6]},
                    "AddressNumber": "123",
                    "Street": "street",
                    "TimeZone": {"Name": "America/Los_Angeles", "Offset": -25200}
                },
                "Relevance": 0.98
            }]
        }"#;

        let response: PlaceSearchResponse = serde_json::from_str(body).unwrap();
        let place = response.results[0].place.as_ref().unwrap();
        assert_eq!(place.geometry.as_ref().unwrap().point, vec![-122.3, 47.6]);
        assert_eq!(place.address_number.as_deref(), Some("123"));
        assert_eq!(
            place.time_zone.as_ref().unwrap().name.as_deref(),
            Some("America/Los_Angeles")
        );
        assert_eq!(response.results[0].relevance, Some(0.98));
    }
}
