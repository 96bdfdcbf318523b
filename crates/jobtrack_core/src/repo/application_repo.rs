//! Application repository over any `RecordStore`.
//!
//! # Responsibility
//! - Create records under fresh `application_<epoch_ms>` keys.
//! - List by enumerate -> filter -> bulk-read -> parse.
//! - Delete and fetch by key.
//!
//! # Invariants
//! - Create never overwrites an existing key.
//! - List drops entries that fail to parse or vanish between enumerate and
//!   read, and reports how many were dropped.
//! - Keys outside the application prefix are ignored.

use crate::model::application::{ApplicationKey, ApplicationRecord};
use crate::store::{RecordStore, StoreError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound on timestamp bumps when the creation key is taken.
const MAX_KEY_ATTEMPTS: i64 = 1_000;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for application persistence.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Encode(serde_json::Error),
    /// Stored value exists but cannot be decoded.
    InvalidData {
        key: ApplicationKey,
        message: String,
    },
    NotFound(ApplicationKey),
    /// No free key near the requested creation timestamp.
    KeyExhausted(i64),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode application: {err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid stored application `{key}`: {message}")
            }
            Self::NotFound(key) => write!(f, "application not found: {key}"),
            Self::KeyExhausted(epoch_ms) => {
                write!(f, "no free application key near timestamp {epoch_ms}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One listed application with its storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredApplication {
    pub key: ApplicationKey,
    pub record: ApplicationRecord,
}

/// Result of a full listing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationListing {
    /// Parsed records in key enumeration order.
    pub items: Vec<StoredApplication>,
    /// Application entries dropped because they were unreadable.
    pub skipped: usize,
}

/// Repository interface for application records.
pub trait ApplicationRepository {
    /// Stores `record` under a fresh key derived from `created_at_ms`.
    fn create_application(
        &mut self,
        record: &ApplicationRecord,
        created_at_ms: i64,
    ) -> RepoResult<ApplicationKey>;
    fn get_application(&self, key: &ApplicationKey) -> RepoResult<Option<ApplicationRecord>>;
    fn list_applications(&self) -> RepoResult<ApplicationListing>;
    fn delete_application(&mut self, key: &ApplicationKey) -> RepoResult<()>;
}

/// Application repository writing through a key-value store.
pub struct StoreApplicationRepository<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> StoreApplicationRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn free_key(&self, created_at_ms: i64) -> RepoResult<ApplicationKey> {
        for offset in 0..MAX_KEY_ATTEMPTS {
            let key = ApplicationKey::from_epoch_ms(created_at_ms.saturating_add(offset));
            if !self.store.contains_key(key.as_str())? {
                return Ok(key);
            }
        }
        Err(RepoError::KeyExhausted(created_at_ms))
    }
}

impl<S: RecordStore> ApplicationRepository for StoreApplicationRepository<S> {
    fn create_application(
        &mut self,
        record: &ApplicationRecord,
        created_at_ms: i64,
    ) -> RepoResult<ApplicationKey> {
        let value = record.to_json().map_err(RepoError::Encode)?;
        let key = self.free_key(created_at_ms)?;
        self.store.set_item(key.as_str(), &value)?;
        Ok(key)
    }

    fn get_application(&self, key: &ApplicationKey) -> RepoResult<Option<ApplicationRecord>> {
        match self.store.get_item(key.as_str())? {
            Some(value) => ApplicationRecord::from_json(&value)
                .map(Some)
                .map_err(|err| RepoError::InvalidData {
                    key: key.clone(),
                    message: err.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn list_applications(&self) -> RepoResult<ApplicationListing> {
        let keys: Vec<String> = self
            .store
            .get_all_keys()?
            .into_iter()
            .filter(|raw| ApplicationKey::parse(raw).is_some())
            .collect();

        let mut listing = ApplicationListing::default();
        for (raw_key, value) in self.store.multi_get(&keys)? {
            let Some(key) = ApplicationKey::parse(&raw_key) else {
                continue;
            };
            let Some(value) = value else {
                debug!("event=application_list module=repo status=skip key={key} reason=missing");
                listing.skipped += 1;
                continue;
            };
            match ApplicationRecord::from_json(&value) {
                Ok(record) => listing.items.push(StoredApplication { key, record }),
                Err(err) => {
                    warn!(
                        "event=application_list module=repo status=skip key={key} reason=parse_failed line={} column={}",
                        err.line(),
                        err.column()
                    );
                    listing.skipped += 1;
                }
            }
        }
        Ok(listing)
    }

    fn delete_application(&mut self, key: &ApplicationKey) -> RepoResult<()> {
        if !self.store.contains_key(key.as_str())? {
            return Err(RepoError::NotFound(key.clone()));
        }
        self.store.remove_item(key.as_str())?;
        Ok(())
    }
}
