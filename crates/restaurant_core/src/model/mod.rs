//! Restaurant domain model.
//!
//! # Responsibility
//! - Define canonical data structures shared by the store, resolver and service.
//!
//! # Invariants
//! - Every stored restaurant is identified by its `RestaurantId`.
//! - Deletion removes the record; there are no tombstones.

pub mod restaurant;
