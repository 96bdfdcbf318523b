//! Domain model for tracked job applications.
//!
//! # Responsibility
//! - Define the persisted application record and its fixed vocabularies.
//! - Define the editable draft used by the entry form.
//!
//! # Invariants
//! - Records are immutable once stored; there is no update path.
//! - Tag sets never contain duplicates.

pub mod application;
pub mod draft;
