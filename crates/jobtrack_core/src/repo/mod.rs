//! Repository layer over the key-value record store.
//!
//! # Responsibility
//! - Map application records to store keys and JSON values.
//! - Keep key scheme and parse policy out of services and screens.
//!
//! # Invariants
//! - One record per key; deletes are per key.
//! - Unparseable entries are skipped on list, never surfaced as records.

pub mod application_repo;
