//! Restaurant domain model.
//!
//! # Responsibility
//! - Define the restaurant record exchanged with callers and persisted by the store.
//! - Keep resolver-owned address fields explicit and optional.
//!
//! # Invariants
//! - `id` is assigned by the service on create and never changes afterwards.
//! - `Address::location` / `Address::timezone_name` are `None` until the
//!   resolver has run for the current address fields.
//! - Absent optional fields are omitted on the wire, never encoded as `""`.

use serde::{Deserialize, Serialize};

/// Stable identifier of one restaurant record; also the storage key.
pub type RestaurantId = String;

/// Restaurant record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Server-generated on create. Optional so inbound create bodies can omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RestaurantId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Postal address plus fields filled in by the location resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Resolver output. Overwritten on every create/update carrying an address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Resolver output. `Some("")` means resolved without timezone metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_name: Option<String>,
}

/// Resolved geocode and normalized address components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// `"<lat>,<lon>"` with six decimal places.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Restaurant {
    /// Creates an unsaved restaurant without identifier or address.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            address: None,
        }
    }

    /// Returns the identifier when present and non-empty.
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

impl Address {
    /// Postal fields in resolver query order: line1, line2, city, state, zip, country.
    pub fn postal_fields(&self) -> [Option<&str>; 6] {
        [
            self.line1.as_deref(),
            self.line2.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.zip_code.as_deref(),
            self.country.as_deref(),
        ]
    }

    /// Replaces resolver-owned fields with a fresh resolution.
    pub fn apply_resolution(&mut self, location: Location, timezone_name: String) {
        self.location = Some(location);
        self.timezone_name = Some(timezone_name);
    }
}
