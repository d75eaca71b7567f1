//! Core use-case services.
//!
//! # Responsibility
//! - Sequence resolver and store calls into create/read/update/delete.
//! - Keep the transport shell decoupled from storage and geocoding details.

pub mod restaurant_service;
