//! Restaurant request orchestration.
//!
//! # Responsibility
//! - Validate request input and assign identifiers.
//! - Resolve addresses before writes, then delegate to the record store.
//! - Classify every result as exactly one `Outcome`.
//!
//! # Invariants
//! - Resolution strictly precedes save/update; a resolver failure means no write.
//! - Client-input errors never touch the store or the resolver.
//! - No retries: at most one resolver call and one store call per operation.

use crate::geocode::{GeocodeError, Geocoder};
use crate::model::restaurant::Restaurant;
use crate::repo::restaurant_repo::RestaurantStore;
use log::{error, info, warn};
use std::fmt::Display;
use uuid::Uuid;

pub const EMPTY_BODY_MESSAGE: &str = "error request body is empty";
pub const EMPTY_ID_MESSAGE: &str = "restaurantId is empty";
pub const ID_MISMATCH_MESSAGE: &str =
    "restaurantId in URL path parameters and restaurant in body do not match";

/// Classification of one orchestrated operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Success carrying the persisted or loaded restaurant.
    Payload(Restaurant),
    /// Success without payload (delete).
    Empty,
    NotFound,
    ClientError(String),
    ServerError(String),
}

impl Outcome {
    fn server_error(operation: &str, err: impl Display) -> Self {
        let message = err.to_string();
        error!("event=restaurant_{operation} module=service status=error error={message}");
        Self::ServerError(message)
    }

    fn client_error(operation: &str, message: &str) -> Self {
        warn!("event=restaurant_{operation} module=service status=rejected reason={message:?}");
        Self::ClientError(message.to_string())
    }
}

/// Request orchestrator over a record store and an address resolver.
pub struct RestaurantService<S: RestaurantStore, G: Geocoder> {
    store: S,
    geocoder: G,
}

impl<S: RestaurantStore, G: Geocoder> RestaurantService<S, G> {
    pub fn new(store: S, geocoder: G) -> Self {
        Self { store, geocoder }
    }

    /// Creates a restaurant from a JSON body.
    ///
    /// # Contract
    /// - Any client-supplied `id` is replaced by a fresh UUID.
    /// - Address, when present, is resolved before `save`.
    pub fn create(&self, body: &str) -> Outcome {
        let mut restaurant = match decode_body("create", body) {
            Ok(restaurant) => restaurant,
            Err(outcome) => return outcome,
        };

        restaurant.id = Some(Uuid::new_v4().to_string());
        info!(
            "event=restaurant_create module=service status=start restaurant_id={} name={:?}",
            restaurant.id.as_deref().unwrap_or_default(),
            restaurant.name
        );

        if let Err(err) = self.resolve_address(&mut restaurant) {
            return Outcome::server_error("create", err);
        }

        match self.store.save(&restaurant) {
            Ok(()) => Outcome::Payload(restaurant),
            Err(err) => Outcome::server_error("create", err),
        }
    }

    /// Loads one restaurant by identifier.
    pub fn read(&self, restaurant_id: &str) -> Outcome {
        if restaurant_id.is_empty() {
            return Outcome::client_error("read", EMPTY_ID_MESSAGE);
        }
        info!("event=restaurant_read module=service status=start restaurant_id={restaurant_id}");

        match self.store.get(restaurant_id) {
            Ok(Some(restaurant)) => Outcome::Payload(restaurant),
            Ok(None) => Outcome::NotFound,
            Err(err) => Outcome::server_error("read", err),
        }
    }

    /// Replaces an existing restaurant.
    ///
    /// # Contract
    /// - Path identifier must be non-empty and equal the body identifier exactly.
    /// - The store rejects updates of records that do not exist.
    pub fn update(&self, restaurant_id: &str, body: &str) -> Outcome {
        if restaurant_id.is_empty() {
            return Outcome::client_error("update", EMPTY_ID_MESSAGE);
        }
        let mut restaurant = match decode_body("update", body) {
            Ok(restaurant) => restaurant,
            Err(outcome) => return outcome,
        };

        if restaurant.id.as_deref() != Some(restaurant_id) {
            return Outcome::client_error("update", ID_MISMATCH_MESSAGE);
        }
        info!(
            "event=restaurant_update module=service status=start restaurant_id={restaurant_id} name={:?}",
            restaurant.name
        );

        if let Err(err) = self.resolve_address(&mut restaurant) {
            return Outcome::server_error("update", err);
        }

        match self.store.update(&restaurant) {
            Ok(()) => Outcome::Payload(restaurant),
            Err(err) => Outcome::server_error("update", err),
        }
    }

    /// Deletes a restaurant. Deleting a missing record succeeds.
    pub fn delete(&self, restaurant_id: &str) -> Outcome {
        if restaurant_id.is_empty() {
            return Outcome::client_error("delete", EMPTY_ID_MESSAGE);
        }
        info!("event=restaurant_delete module=service status=start restaurant_id={restaurant_id}");

        match self.store.delete(restaurant_id) {
            Ok(()) => Outcome::Empty,
            Err(err) => Outcome::server_error("delete", err),
        }
    }

    fn resolve_address(&self, restaurant: &mut Restaurant) -> Result<(), GeocodeError> {
        if let Some(address) = restaurant.address.as_mut() {
            let (location, timezone_name) = self.geocoder.geocode(address)?;
            address.apply_resolution(location, timezone_name);
        }
        Ok(())
    }
}

fn decode_body(operation: &str, body: &str) -> Result<Restaurant, Outcome> {
    if body.is_empty() {
        return Err(Outcome::client_error(operation, EMPTY_BODY_MESSAGE));
    }

    serde_json::from_str(body).map_err(|err| {
        Outcome::server_error(
            operation,
            format!("error unmarshalling request body: {err}"),
        )
    })
}
