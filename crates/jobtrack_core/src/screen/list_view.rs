//! Home list state and the confirm-to-delete flow.
//!
//! # Invariants
//! - After a successful `refresh`, `items` equals the readable persisted set.
//! - Delete flow is `Idle -> ConfirmPending(index) -> Idle`; nothing else.
//! - Confirm deletes from the store first, then from `items`; a failed store
//!   delete leaves `items` unchanged.
//! - A row whose record is already gone from the store is dropped on confirm.

use crate::model::application::ApplicationKey;
use crate::repo::application_repo::{ApplicationRepository, StoredApplication};
use crate::screen::Screen;
use crate::service::application_service::{ApplicationService, ServiceError};
use crate::service::clock::Clock;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Delete confirmation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    Idle,
    ConfirmPending(usize),
}

/// List screen failure.
#[derive(Debug)]
pub enum ListViewError {
    IndexOutOfRange { index: usize, len: usize },
    Service(ServiceError),
}

impl Display for ListViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} application(s)")
            }
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<ServiceError> for ListViewError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

/// What a confirm/cancel call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// No prompt was open.
    NoPrompt,
    Dismissed,
    Deleted(StoredApplication),
}

/// Home screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    items: Vec<StoredApplication>,
    skipped: usize,
    delete_flow: DeleteFlow,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the view and performs the mount-time read.
    pub fn mount<R: ApplicationRepository, C: Clock>(
        service: &ApplicationService<R, C>,
    ) -> Result<Self, ListViewError> {
        let mut view = Self::new();
        view.refresh(service)?;
        Ok(view)
    }

    /// Re-reads every record, replacing the in-memory sequence.
    ///
    /// On error the previous sequence is kept.
    pub fn refresh<R: ApplicationRepository, C: Clock>(
        &mut self,
        service: &ApplicationService<R, C>,
    ) -> Result<(), ListViewError> {
        let listing = service.list_applications()?;
        self.items = listing.items;
        self.skipped = listing.skipped;
        self.delete_flow = DeleteFlow::Idle;
        Ok(())
    }

    pub fn items(&self) -> &[StoredApplication] {
        &self.items
    }

    /// Entries dropped by the last refresh because they were unreadable.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn delete_flow(&self) -> DeleteFlow {
        self.delete_flow
    }

    /// Position of the row stored under `key`.
    pub fn index_of(&self, key: &ApplicationKey) -> Option<usize> {
        self.items.iter().position(|item| &item.key == key)
    }

    /// Items whose company or position contains `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&StoredApplication> {
        self.items
            .iter()
            .filter(|item| item.record.matches_query(query))
            .collect()
    }

    /// Tap on a row: navigate to its details.
    pub fn tap(&self, index: usize) -> Result<Screen, ListViewError> {
        let item = self.item(index)?;
        Ok(Screen::Details(item.key.clone()))
    }

    /// Long-press on a row: open the delete prompt for it.
    pub fn long_press(&mut self, index: usize) -> Result<&StoredApplication, ListViewError> {
        self.item(index)?;
        self.delete_flow = DeleteFlow::ConfirmPending(index);
        debug!("event=delete_prompt module=screen status=open index={index}");
        Ok(&self.items[index])
    }

    /// Confirms the open prompt, deleting the pending record.
    pub fn confirm<R: ApplicationRepository, C: Clock>(
        &mut self,
        service: &mut ApplicationService<R, C>,
    ) -> Result<PromptResult, ListViewError> {
        let DeleteFlow::ConfirmPending(index) = std::mem::take(&mut self.delete_flow) else {
            return Ok(PromptResult::NoPrompt);
        };
        let key: ApplicationKey = self.item(index)?.key.clone();
        match service.delete_application(&key) {
            Ok(()) => {}
            Err(ServiceError::ApplicationNotFound(_)) => {
                warn!("event=delete_confirm module=screen status=stale key={key}");
            }
            Err(err) => return Err(err.into()),
        }
        Ok(PromptResult::Deleted(self.items.remove(index)))
    }

    /// Dismisses the open prompt without changes.
    pub fn cancel(&mut self) -> PromptResult {
        match std::mem::take(&mut self.delete_flow) {
            DeleteFlow::Idle => PromptResult::NoPrompt,
            DeleteFlow::ConfirmPending(_) => PromptResult::Dismissed,
        }
    }

    /// Target of the floating add button.
    pub fn add_new(&self) -> Screen {
        Screen::NewApplication
    }

    fn item(&self, index: usize) -> Result<&StoredApplication, ListViewError> {
        self.items.get(index).ok_or(ListViewError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DeleteFlow, ListView, ListViewError, PromptResult};
    use crate::model::draft::ApplicationDraft;
    use crate::repo::application_repo::StoreApplicationRepository;
    use crate::screen::Screen;
    use crate::service::application_service::ApplicationService;
    use crate::service::clock::FixedClock;
    use crate::store::{MemoryRecordStore, RecordStore};

    fn service_with(
        companies: &[&str],
    ) -> ApplicationService<StoreApplicationRepository<MemoryRecordStore>, FixedClock> {
        let repo = StoreApplicationRepository::new(MemoryRecordStore::new());
        let mut service = ApplicationService::with_clock(repo, FixedClock::new(100));
        for company in companies {
            let draft: ApplicationDraft = service.new_draft().with_company_name(*company);
            service.save_draft(&draft).unwrap();
        }
        service
    }

    #[test]
    fn cancel_leaves_items_untouched() {
        let service = service_with(&["a", "b"]);
        let mut view = ListView::mount(&service).unwrap();

        view.long_press(1).unwrap();
        assert_eq!(view.delete_flow(), DeleteFlow::ConfirmPending(1));
        assert_eq!(view.cancel(), PromptResult::Dismissed);
        assert_eq!(view.delete_flow(), DeleteFlow::Idle);
        assert_eq!(view.items().len(), 2);
        assert_eq!(view.cancel(), PromptResult::NoPrompt);
    }

    #[test]
    fn long_press_out_of_range_keeps_idle() {
        let service = service_with(&["a"]);
        let mut view = ListView::mount(&service).unwrap();

        let err = view.long_press(3).unwrap_err();
        assert!(matches!(err, ListViewError::IndexOutOfRange { index: 3, len: 1 }));
        assert_eq!(view.delete_flow(), DeleteFlow::Idle);
    }

    #[test]
    fn confirm_without_prompt_is_noop() {
        let mut service = service_with(&["a"]);
        let mut view = ListView::mount(&service).unwrap();
        assert_eq!(view.confirm(&mut service).unwrap(), PromptResult::NoPrompt);
        assert_eq!(view.items().len(), 1);
    }

    #[test]
    fn tap_targets_details_and_search_filters() {
        let service = service_with(&["Google", "Globex"]);
        let view = ListView::mount(&service).unwrap();

        let first_key = view.items()[0].key.clone();
        assert_eq!(view.index_of(&first_key), Some(0));
        assert_eq!(view.tap(0).unwrap(), Screen::Details(first_key));
        assert_eq!(view.search("glob").len(), 1);
        assert_eq!(view.search("").len(), 2);
        assert_eq!(view.add_new(), Screen::NewApplication);
    }

    fn fill(store: &mut MemoryRecordStore, companies: &[&str]) {
        let repo = StoreApplicationRepository::new(store);
        let mut service = ApplicationService::with_clock(repo, FixedClock::new(100));
        for company in companies {
            let draft = service.new_draft().with_company_name(*company);
            service.save_draft(&draft).unwrap();
        }
    }

    fn mount_over(store: &mut MemoryRecordStore) -> ListView {
        let service = ApplicationService::new(StoreApplicationRepository::new(store));
        ListView::mount(&service).unwrap()
    }

    #[test]
    fn failed_confirm_keeps_items_and_returns_idle() {
        let mut store = MemoryRecordStore::new();
        fill(&mut store, &["a", "b"]);
        let mut view = mount_over(&mut store);
        view.long_press(0).unwrap();

        store.set_read_only(true);
        let mut service = ApplicationService::new(StoreApplicationRepository::new(&mut store));
        let err = view.confirm(&mut service).unwrap_err();

        assert!(matches!(err, ListViewError::Service(_)));
        assert_eq!(view.items().len(), 2);
        assert_eq!(view.delete_flow(), DeleteFlow::Idle);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn failed_refresh_keeps_previous_items() {
        let mut store = MemoryRecordStore::new();
        fill(&mut store, &["a", "b"]);
        let mut view = mount_over(&mut store);
        let before = view.items().to_vec();

        store.set_offline(true);
        let service = ApplicationService::new(StoreApplicationRepository::new(&mut store));
        assert!(view.refresh(&service).is_err());
        assert_eq!(view.items(), before.as_slice());
    }

    #[test]
    fn confirm_drops_row_already_removed_elsewhere() {
        let mut store = MemoryRecordStore::new();
        fill(&mut store, &["a", "b"]);
        let mut view = mount_over(&mut store);
        let gone = view.items()[0].key.clone();
        store.remove_item(gone.as_str()).unwrap();

        view.long_press(0).unwrap();
        let mut service = ApplicationService::new(StoreApplicationRepository::new(&mut store));
        let result = view.confirm(&mut service).unwrap();

        assert!(matches!(result, PromptResult::Deleted(ref item) if item.key == gone));
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.index_of(&gone), None);
        assert_eq!(view.delete_flow(), DeleteFlow::Idle);
    }
}
