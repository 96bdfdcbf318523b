//! Editable draft for the new-application form.
//!
//! # Responsibility
//! - Hold the in-progress record as one immutable value.
//! - Apply field edits and toggle semantics, returning a new draft.
//!
//! # Invariants
//! - Salary selection is exclusive: at most one band is selected.
//! - Tag toggles are independent; a double toggle is an identity.
//! - Highlight state is derived from the draft, never stored beside it.

use crate::model::application::{ApplicationRecord, SalaryRange, Tag};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// One field-set operation on a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    CompanyName(String),
    Position(String),
    Notes(String),
    Date(NaiveDate),
    SelectSalary(SalaryRange),
    ClearSalary,
    ToggleTag(Tag),
}

/// In-progress application that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    company_name: String,
    position: String,
    salary_range: Option<SalaryRange>,
    notes: String,
    selected_tags: BTreeSet<Tag>,
    date: NaiveDate,
}

impl ApplicationDraft {
    /// Creates an empty draft dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            company_name: String::new(),
            position: String::new(),
            salary_range: None,
            notes: String::new(),
            selected_tags: BTreeSet::new(),
            date: today,
        }
    }

    /// Applies one edit and returns the resulting draft.
    #[must_use]
    pub fn apply(self, edit: DraftEdit) -> Self {
        match edit {
            DraftEdit::CompanyName(value) => self.with_company_name(value),
            DraftEdit::Position(value) => self.with_position(value),
            DraftEdit::Notes(value) => self.with_notes(value),
            DraftEdit::Date(value) => self.with_date(value),
            DraftEdit::SelectSalary(band) => self.select_salary(band),
            DraftEdit::ClearSalary => self.clear_salary(),
            DraftEdit::ToggleTag(tag) => self.toggle_tag(tag),
        }
    }

    #[must_use]
    pub fn with_company_name(mut self, value: impl Into<String>) -> Self {
        self.company_name = value.into();
        self
    }

    #[must_use]
    pub fn with_position(mut self, value: impl Into<String>) -> Self {
        self.position = value.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, value: impl Into<String>) -> Self {
        self.notes = value.into();
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Selects `band`, deselecting any other band.
    #[must_use]
    pub fn select_salary(mut self, band: SalaryRange) -> Self {
        self.salary_range = Some(band);
        self
    }

    #[must_use]
    pub fn clear_salary(mut self) -> Self {
        self.salary_range = None;
        self
    }

    /// Adds `tag` when absent, removes it when present.
    #[must_use]
    pub fn toggle_tag(mut self, tag: Tag) -> Self {
        if !self.selected_tags.remove(&tag) {
            self.selected_tags.insert(tag);
        }
        self
    }

    /// Adds `tag`; selecting an already selected tag keeps it.
    #[must_use]
    pub fn select_tag(mut self, tag: Tag) -> Self {
        self.selected_tags.insert(tag);
        self
    }

    /// Empty draft keeping the current date.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::new(self.date)
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn salary_range(&self) -> Option<SalaryRange> {
        self.salary_range
    }

    pub fn selected_tags(&self) -> &BTreeSet<Tag> {
        &self.selected_tags
    }

    pub fn is_salary_selected(&self, band: SalaryRange) -> bool {
        self.salary_range == Some(band)
    }

    pub fn is_tag_selected(&self, tag: Tag) -> bool {
        self.selected_tags.contains(&tag)
    }

    /// Salary bands paired with their highlight state, in display order.
    pub fn salary_options(&self) -> Vec<(SalaryRange, bool)> {
        SalaryRange::ALL
            .into_iter()
            .map(|band| (band, self.is_salary_selected(band)))
            .collect()
    }

    /// Tags paired with their highlight state, in display order.
    pub fn tag_options(&self) -> Vec<(Tag, bool)> {
        Tag::ALL
            .into_iter()
            .map(|tag| (tag, self.is_tag_selected(tag)))
            .collect()
    }

    /// Snapshot of the draft as a storable record. No field is validated.
    pub fn to_record(&self) -> ApplicationRecord {
        ApplicationRecord {
            company_name: self.company_name.clone(),
            position: self.position.clone(),
            salary_range: self.salary_range,
            notes: self.notes.clone(),
            selected_tags: self.selected_tags.clone(),
            date: self.date,
        }
    }
}
