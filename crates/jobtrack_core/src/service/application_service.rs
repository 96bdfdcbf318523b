//! Application use-case service.
//!
//! # Responsibility
//! - Save drafts as new records, list, fetch and delete records.
//! - Emit metadata-only log events for every storage call.
//!
//! # Invariants
//! - Failures are returned to the caller as well as logged; nothing is
//!   swallowed.
//! - Service layer stays storage-agnostic.

use crate::model::application::{ApplicationKey, ApplicationRecord};
use crate::model::draft::ApplicationDraft;
use crate::repo::application_repo::{
    ApplicationListing, ApplicationRepository, RepoError, StoredApplication,
};
use crate::service::clock::{Clock, SystemClock};
use chrono::NaiveDate;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for application use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target application does not exist.
    ApplicationNotFound(ApplicationKey),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApplicationNotFound(key) => write!(f, "application not found: {key}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::ApplicationNotFound(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(key) => Self::ApplicationNotFound(key),
            other => Self::Repo(other),
        }
    }
}

/// Application service facade over repository implementations.
pub struct ApplicationService<R: ApplicationRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: ApplicationRepository> ApplicationService<R> {
    /// Creates a service on the local wall clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: ApplicationRepository, C: Clock> ApplicationService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Default date for a fresh draft.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Empty draft dated today.
    pub fn new_draft(&self) -> ApplicationDraft {
        ApplicationDraft::new(self.today())
    }

    /// Persists `draft` under a fresh key. Empty fields are accepted.
    pub fn save_draft(&mut self, draft: &ApplicationDraft) -> ServiceResult<StoredApplication> {
        self.create_application(draft.to_record())
    }

    /// Persists one record under a fresh key.
    pub fn create_application(
        &mut self,
        record: ApplicationRecord,
    ) -> ServiceResult<StoredApplication> {
        let started_at = Instant::now();
        let created_at_ms = self.clock.now_epoch_ms();
        match self.repo.create_application(&record, created_at_ms) {
            Ok(key) => {
                info!(
                    "event=application_create module=service status=ok key={key} tags={} duration_ms={}",
                    record.selected_tags.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(StoredApplication { key, record })
            }
            Err(err) => {
                error!(
                    "event=application_create module=service status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err.into())
            }
        }
    }

    /// Lists every readable application; unreadable entries are counted.
    pub fn list_applications(&self) -> ServiceResult<ApplicationListing> {
        let started_at = Instant::now();
        match self.repo.list_applications() {
            Ok(listing) => {
                info!(
                    "event=application_list module=service status=ok count={} skipped={} duration_ms={}",
                    listing.items.len(),
                    listing.skipped,
                    started_at.elapsed().as_millis()
                );
                Ok(listing)
            }
            Err(err) => {
                error!("event=application_list module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Fetches one application for the details screen.
    pub fn get_application(&self, key: &ApplicationKey) -> ServiceResult<Option<ApplicationRecord>> {
        Ok(self.repo.get_application(key)?)
    }

    /// Deletes one application by key.
    pub fn delete_application(&mut self, key: &ApplicationKey) -> ServiceResult<()> {
        match self.repo.delete_application(key) {
            Ok(()) => {
                info!("event=application_delete module=service status=ok key={key}");
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=application_delete module=service status=error key={key} error={err}"
                );
                Err(err.into())
            }
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
