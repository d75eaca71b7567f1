//! HTTP place-search backend.
//!
//! Talks to the Amazon Location places API:
//! `POST {endpoint}/places/v0/indexes/{index}/search/text`.
//! Authentication is by API key query parameter when one is configured.

use super::place_search::{PlaceSearchRequest, PlaceSearchResponse, PlaceSearcher};
use super::GeocodeError;
use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

/// Connection settings for `HttpPlaceSearcher`.
#[derive(Debug, Clone)]
pub struct HttpPlaceSearchConfig {
    /// Base URL, e.g. `https://places.geo.us-east-1.amazonaws.com`.
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl HttpPlaceSearchConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Blocking HTTP client for place search.
pub struct HttpPlaceSearcher {
    client: Client,
    config: HttpPlaceSearchConfig,
}

impl HttpPlaceSearcher {
    pub fn new(config: HttpPlaceSearchConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn search_url(&self, index_name: &str) -> String {
        format!(
            "{}/places/v0/indexes/{}/search/text",
            self.config.endpoint.trim_end_matches('/'),
            index_name
        )
    }
}

impl PlaceSearcher for HttpPlaceSearcher {
    fn search_place_index_for_text(
        &self,
        request: &PlaceSearchRequest,
    ) -> Result<PlaceSearchResponse, GeocodeError> {
        let url = self.search_url(&request.index_name);
        debug!(
            "event=place_search module=geocode status=start index={}",
            request.index_name
        );

        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = self.config.api_key.as_deref() {
            builder = builder.query(&[("key", key)]);
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text()?;
        let data: PlaceSearchResponse = serde_json::from_str(&text)?;
        debug!(
            "event=place_search module=geocode status=ok index={} results={}",
            request.index_name,
            data.results.len()
        );
        Ok(data)
    }
}
