//! New-application form state.
//!
//! # Invariants
//! - A successful save resets the draft (date kept) and targets the list.
//! - A failed save keeps the draft untouched so the user can retry.

use crate::model::application::{SalaryRange, Tag};
use crate::model::draft::{ApplicationDraft, DraftEdit};
use crate::repo::application_repo::{ApplicationRepository, StoredApplication};
use crate::screen::Screen;
use crate::service::application_service::{ApplicationService, ServiceResult};
use crate::service::clock::Clock;

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub saved: StoredApplication,
    /// Screen to replace the form with.
    pub navigate_to: Screen,
}

/// Entry form bound to one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    draft: ApplicationDraft,
}

impl EntryForm {
    /// Opens the form with an empty draft dated today.
    pub fn open<R: ApplicationRepository, C: Clock>(service: &ApplicationService<R, C>) -> Self {
        Self {
            draft: service.new_draft(),
        }
    }

    pub fn from_draft(draft: ApplicationDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn edit(&mut self, edit: DraftEdit) {
        self.draft = self.draft.clone().apply(edit);
    }

    pub fn select_salary(&mut self, band: SalaryRange) {
        self.edit(DraftEdit::SelectSalary(band));
    }

    pub fn toggle_tag(&mut self, tag: Tag) {
        self.edit(DraftEdit::ToggleTag(tag));
    }

    /// Selects `tag` without toggling it back off when already selected.
    pub fn select_tag(&mut self, tag: Tag) {
        self.draft = self.draft.clone().select_tag(tag);
    }

    /// Writes the draft as a new record.
    pub fn save<R: ApplicationRepository, C: Clock>(
        &mut self,
        service: &mut ApplicationService<R, C>,
    ) -> ServiceResult<SaveOutcome> {
        let saved = service.save_draft(&self.draft)?;
        self.draft = self.draft.clone().reset();
        Ok(SaveOutcome {
            saved,
            navigate_to: Screen::List,
        })
    }
}
