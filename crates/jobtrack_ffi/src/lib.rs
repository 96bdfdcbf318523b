//! Flutter-facing bindings for JobTrack core.

pub mod api;
