//! Table session: one interactive page of the record table.
//!
//! Owns the store, the filter state and the add-member form, and applies
//! discrete user actions to them. Each action mutates at most one of those,
//! the store flushes itself, and callers re-read [`TableSession::visible`]
//! to render.

use crate::form::{FormController, FormField};
use crate::record::Record;
use crate::selection;
use crate::store::RecordStore;
use crate::types::RecordId;
use crate::views::{table_view, FilterOptions, FilterState};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

/// A user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenForm,
    SetField(FormField, String),
    /// Submit the form, dated with the given calendar day
    SubmitForm(NaiveDate),
    CancelForm,
    SetStatusFilter(BTreeSet<String>),
    SetCompanyFilter(BTreeSet<String>),
    ToggleOne { id: RecordId, checked: bool },
    ToggleAll,
    Delete(RecordId),
    DeleteSelected,
    DeleteAll,
}

/// What an action changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Form or filter state changed; store untouched
    ViewChanged,
    Added(RecordId),
    Removed(usize),
    SelectionChanged,
    /// The action referred to nothing (unknown id, hidden form)
    NoChange,
}

/// Table session state
pub struct TableSession {
    store: RecordStore,
    filters: FilterState,
    form: FormController,
    default_statuses: Vec<String>,
    default_companies: Vec<String>,
}

impl TableSession {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            filters: FilterState::default(),
            form: FormController::new(),
            default_statuses: Vec::new(),
            default_companies: Vec::new(),
        }
    }

    /// Seed the filter widgets with configured choices
    pub fn with_filter_defaults(mut self, statuses: Vec<String>, companies: Vec<String>) -> Self {
        self.default_statuses = statuses;
        self.default_companies = companies;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Rows to render under the current filters
    pub fn visible(&self) -> Vec<&Record> {
        table_view(self.store.records(), &self.filters)
    }

    /// Header checkbox state
    pub fn select_all(&self) -> bool {
        selection::select_all(self.store.records())
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::collect(
            self.store.records(),
            &self.default_statuses,
            &self.default_companies,
        )
    }

    pub fn apply(&mut self, action: Action) -> Outcome {
        debug!(?action, "Applying table action");
        match action {
            Action::OpenForm => {
                self.form.open();
                Outcome::ViewChanged
            }
            Action::SetField(field, value) => {
                if self.form.set_field(field, value) {
                    Outcome::ViewChanged
                } else {
                    Outcome::NoChange
                }
            }
            Action::SubmitForm(today) => match self.form.submit_on(today) {
                Some(new) => Outcome::Added(self.store.add(new)),
                None => Outcome::NoChange,
            },
            Action::CancelForm => {
                self.form.cancel();
                Outcome::ViewChanged
            }
            Action::SetStatusFilter(values) => {
                self.filters.status = values;
                Outcome::ViewChanged
            }
            Action::SetCompanyFilter(values) => {
                self.filters.company = values;
                Outcome::ViewChanged
            }
            Action::ToggleOne { id, checked } => {
                if selection::toggle_one(&mut self.store, &id, checked) {
                    Outcome::SelectionChanged
                } else {
                    Outcome::NoChange
                }
            }
            Action::ToggleAll => {
                let current = self.select_all();
                selection::toggle_all(&mut self.store, current);
                Outcome::SelectionChanged
            }
            Action::Delete(id) => {
                if self.store.remove(&id) {
                    Outcome::Removed(1)
                } else {
                    Outcome::NoChange
                }
            }
            Action::DeleteSelected => match self.store.remove_selected() {
                0 => Outcome::NoChange,
                n => Outcome::Removed(n),
            },
            Action::DeleteAll => match self.store.clear() {
                0 => Outcome::NoChange,
                n => Outcome::Removed(n),
            },
        }
    }
}
