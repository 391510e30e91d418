//! Add-member form: four free-text fields behind a Hidden/Visible toggle.

use crate::record::NewRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Form display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Hidden,
    Visible,
}

/// One of the form's input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Company,
    Status,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Company,
        FormField::Status,
        FormField::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Company => "Company",
            FormField::Status => "Status",
            FormField::Notes => "Notes",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(FormField::Name),
            "company" => Ok(FormField::Company),
            "status" => Ok(FormField::Status),
            "notes" => Ok(FormField::Notes),
            other => Err(format!("Unknown form field: {}", other)),
        }
    }
}

/// Current input values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub company: String,
    pub status: String,
    pub notes: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Company => &self.company,
            FormField::Status => &self.status,
            FormField::Notes => &self.notes,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Company => &mut self.company,
            FormField::Status => &mut self.status,
            FormField::Notes => &mut self.notes,
        }
    }
}

/// Form controller
#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
    fields: FormFields,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == FormState::Visible
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Show the form. Opening an already visible form keeps its inputs.
    pub fn open(&mut self) {
        self.state = FormState::Visible;
    }

    /// Update one input. Ignored while the form is hidden.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if !self.is_visible() {
            return false;
        }
        *self.fields.slot(field) = value.into();
        true
    }

    /// Submit with `today` as the record date: clears inputs and hides the
    /// form. Returns `None` if the form was not visible.
    pub fn submit_on(&mut self, today: NaiveDate) -> Option<NewRecord> {
        if !self.is_visible() {
            return None;
        }
        let fields = std::mem::take(&mut self.fields);
        self.state = FormState::Hidden;
        Some(NewRecord {
            name: fields.name,
            company: fields.company,
            status: fields.status,
            notes: fields.notes,
            last_updated: today,
        })
    }

    /// Submit dated with the local calendar date.
    pub fn submit(&mut self) -> Option<NewRecord> {
        self.submit_on(today())
    }

    /// Discard inputs and hide the form without creating anything.
    pub fn cancel(&mut self) {
        self.fields = FormFields::default();
        self.state = FormState::Hidden;
    }
}

/// Local calendar date, no time of day
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
