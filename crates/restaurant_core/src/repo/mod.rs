//! Record store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the restaurant storage contract used by the service layer.
//! - Isolate SQLite query details from request orchestration.
//!
//! # Invariants
//! - Update is conditional on the record existing; save is not.
//! - "Not found" on read is `Ok(None)`, never an error.

pub mod restaurant_repo;
