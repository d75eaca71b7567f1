//! Core logic for the restaurant service.
//! Owns the record store, address resolver and request orchestration.

pub mod config;
pub mod db;
pub mod geocode;
pub mod handler;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CorsConfig, ServiceConfig};
pub use geocode::{
    GeocodeError, Geocoder, HttpPlaceSearchConfig, HttpPlaceSearcher, LocationService,
    PlaceSearcher,
};
pub use handler::{Operation, Request, Response, RestaurantHandler};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::restaurant::{Address, Location, Restaurant, RestaurantId};
pub use repo::restaurant_repo::{
    RestaurantStore, SqliteRestaurantStore, StoreError, StoreResult, StoredRestaurant,
};
pub use service::restaurant_service::{Outcome, RestaurantService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
