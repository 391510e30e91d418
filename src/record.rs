//! Team member records.
//!
//! The JSON shape matches the persisted table format: camelCase
//! `lastUpdated`, and tolerant defaults for payloads written before records
//! carried an `id` or a `selected` flag.

use crate::types::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Record: one team member row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    /// Usually "Active" or "Closed"; not enforced
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    /// Calendar date the record was created; never mutated
    #[serde(rename = "lastUpdated")]
    pub last_updated: NaiveDate,
    #[serde(default)]
    pub selected: bool,
}

impl Record {
    /// Build a stored record from form output with a fresh id, unselected.
    pub fn from_new(new: NewRecord) -> Self {
        Self {
            id: RecordId::generate(),
            name: new.name,
            company: new.company,
            status: new.status,
            notes: new.notes,
            last_updated: new.last_updated,
            selected: false,
        }
    }

    /// Field-wise equality ignoring `id`.
    pub fn same_content(&self, other: &Record) -> bool {
        self.name == other.name
            && self.company == other.company
            && self.status == other.status
            && self.notes == other.notes
            && self.last_updated == other.last_updated
            && self.selected == other.selected
    }
}

/// NewRecord: the form's output contract, before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: String,
    pub company: String,
    pub status: String,
    pub notes: String,
    pub last_updated: NaiveDate,
}

impl NewRecord {
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        status: impl Into<String>,
        notes: impl Into<String>,
        last_updated: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            status: status.into(),
            notes: notes.into(),
            last_updated,
        }
    }
}
