//! Request/response boundary between the transport shell and the service.
//!
//! # Responsibility
//! - Extract body and `restaurantId` from an inbound request.
//! - Map each service `Outcome` to a status code and JSON body.
//! - Attach configured CORS headers to every response.
//!
//! # Invariants
//! - Error bodies are `{"Message": "<text>"}`.
//! - Not-found responses carry no body.

use crate::config::CorsConfig;
use crate::geocode::Geocoder;
use crate::model::restaurant::Restaurant;
use crate::repo::restaurant_repo::RestaurantStore;
use crate::service::restaurant_service::{Outcome, RestaurantService};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Path parameter carrying the restaurant identifier.
pub const RESTAURANT_ID_PARAM: &str = "restaurantId";

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Inbound request as supplied by the transport shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub path_parameters: HashMap<String, String>,
}

impl Request {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_restaurant_id(mut self, restaurant_id: impl Into<String>) -> Self {
        self.path_parameters
            .insert(RESTAURANT_ID_PARAM.to_string(), restaurant_id.into());
        self
    }

    /// Path identifier, or `""` when the parameter is missing.
    pub fn restaurant_id(&self) -> &str {
        self.path_parameters
            .get(RESTAURANT_ID_PARAM)
            .map_or("", String::as_str)
    }
}

/// Outbound response handed back to the transport shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct MessageBody<'a> {
    message: &'a str,
}

/// CRUD operation selected by the transport route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    fn success_status(self) -> u16 {
        match self {
            Self::Create => STATUS_CREATED,
            Self::Read | Self::Update | Self::Delete => STATUS_OK,
        }
    }
}

/// Entry point invoked by the transport shell once per request.
pub struct RestaurantHandler<S: RestaurantStore, G: Geocoder> {
    service: RestaurantService<S, G>,
    cors: CorsConfig,
}

impl<S: RestaurantStore, G: Geocoder> RestaurantHandler<S, G> {
    pub fn new(service: RestaurantService<S, G>, cors: CorsConfig) -> Self {
        Self { service, cors }
    }

    pub fn handle(&self, operation: Operation, request: &Request) -> Response {
        log_json("Request", request);

        let outcome = match operation {
            Operation::Create => self.service.create(&request.body),
            Operation::Read => self.service.read(request.restaurant_id()),
            Operation::Update => self
                .service
                .update(request.restaurant_id(), &request.body),
            Operation::Delete => self.service.delete(request.restaurant_id()),
        };

        let response = self.respond(operation, outcome);
        log_json("Response", &response);
        response
    }

    pub fn create(&self, request: &Request) -> Response {
        self.handle(Operation::Create, request)
    }

    pub fn read(&self, request: &Request) -> Response {
        self.handle(Operation::Read, request)
    }

    pub fn update(&self, request: &Request) -> Response {
        self.handle(Operation::Update, request)
    }

    pub fn delete(&self, request: &Request) -> Response {
        self.handle(Operation::Delete, request)
    }

    fn respond(&self, operation: Operation, outcome: Outcome) -> Response {
        let (status_code, body) = match outcome {
            Outcome::Payload(restaurant) => match encode_restaurant(&restaurant) {
                Ok(body) => (operation.success_status(), body),
                Err(message) => (STATUS_INTERNAL_SERVER_ERROR, message_body(&message)),
            },
            Outcome::Empty => (operation.success_status(), String::new()),
            Outcome::NotFound => (STATUS_NOT_FOUND, String::new()),
            Outcome::ClientError(message) => (STATUS_BAD_REQUEST, message_body(&message)),
            Outcome::ServerError(message) => {
                (STATUS_INTERNAL_SERVER_ERROR, message_body(&message))
            }
        };

        Response {
            status_code,
            headers: self.cors.headers(),
            body,
        }
    }
}

fn encode_restaurant(restaurant: &Restaurant) -> Result<String, String> {
    serde_json::to_string(restaurant).map_err(|err| format!("error marshalling data: {err}"))
}

/// Encodes `{"Message": message}`.
pub fn message_body(message: &str) -> String {
    serde_json::to_string(&MessageBody { message }).unwrap_or_else(|err| {
        error!("event=response_encode module=handler status=error error={err}");
        String::new()
    })
}

fn log_json(label: &str, value: &impl Serialize) {
    match serde_json::to_string(value) {
        Ok(json) => debug!("{label}: {json}"),
        Err(err) => debug!("{label}: <unencodable: {err}>"),
    }
}
