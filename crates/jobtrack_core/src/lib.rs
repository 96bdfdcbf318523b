//! Core domain logic for JobTrack.
//! This crate is the single source of truth for application-record rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod screen;
pub mod service;
pub mod store;

pub use config::CoreConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::application::{
    ApplicationKey, ApplicationRecord, SalaryRange, Tag, APPLICATION_KEY_PREFIX,
};
pub use model::draft::{ApplicationDraft, DraftEdit};
pub use repo::application_repo::{
    ApplicationListing, ApplicationRepository, RepoError, RepoResult, StoreApplicationRepository,
    StoredApplication,
};
pub use screen::entry_form::{EntryForm, SaveOutcome};
pub use screen::list_view::{DeleteFlow, ListView, ListViewError, PromptResult};
pub use screen::Screen;
pub use service::application_service::{ApplicationService, ServiceError, ServiceResult};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use store::{MemoryRecordStore, RecordStore, SqliteRecordStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
