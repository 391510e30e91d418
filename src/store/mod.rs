//! Record Store
//!
//! Holds the canonical ordered sequence of records for one table session and
//! flushes it to the persistence adapter after every mutation. All operations
//! are total: an unknown id is a no-op, and a failed flush is logged while the
//! in-memory sequence stays authoritative.

pub mod persistence;

use crate::record::{NewRecord, Record};
use crate::types::RecordId;
use persistence::RecordPersistence;
use tracing::{debug, warn};

/// Record store: ordered records plus their persistence adapter
pub struct RecordStore {
    records: Vec<Record>,
    persistence: RecordPersistence,
    last_flush_failed: bool,
}

impl RecordStore {
    /// Open a store initialized from whatever the adapter has stored.
    ///
    /// Ids assigned while loading are written back at once so they survive
    /// the next open.
    pub fn open(persistence: RecordPersistence) -> Self {
        let loaded = persistence.load_table();
        let mut store = Self {
            records: loaded.records,
            persistence,
            last_flush_failed: false,
        };
        if loaded.ids_assigned > 0 {
            debug!(assigned = loaded.ids_assigned, "Persisting ids assigned on load");
            store.flush();
        }
        store
    }

    /// Store backed by throwaway in-memory storage
    pub fn in_memory() -> Self {
        Self::open(RecordPersistence::in_memory())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == *id)
    }

    /// Whether the most recent flush failed to write
    pub fn last_flush_failed(&self) -> bool {
        self.last_flush_failed
    }

    /// Resolve a full id or a unique prefix of the short id form.
    pub fn resolve(&self, needle: &str) -> Option<RecordId> {
        if let Ok(id) = needle.parse::<RecordId>() {
            return self.get(&id).map(|r| r.id);
        }
        let needle = needle.trim().to_ascii_lowercase().replace('-', "");
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .records
            .iter()
            .filter(|r| r.id.to_string().replace('-', "").starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.id),
            _ => None,
        }
    }

    /// Append a record with a fresh id, unselected. No field validation.
    pub fn add(&mut self, new: NewRecord) -> RecordId {
        let record = Record::from_new(new);
        let id = record.id;
        debug!(%id, "Adding record");
        self.records.push(record);
        self.flush();
        id
    }

    /// Remove the record with `id`. Returns false (and does nothing) if absent.
    pub fn remove(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != *id);
        if self.records.len() == before {
            debug!(%id, "Remove: no such record");
            return false;
        }
        debug!(%id, "Removed record");
        self.flush();
        true
    }

    /// Set one record's selected flag. Returns false if `id` is absent.
    pub fn set_selection(&mut self, id: &RecordId, selected: bool) -> bool {
        match self.records.iter_mut().find(|r| r.id == *id) {
            Some(record) => {
                record.selected = selected;
                self.flush();
                true
            }
            None => {
                debug!(%id, "Select: no such record");
                false
            }
        }
    }

    /// Set every record's selected flag.
    pub fn set_all_selection(&mut self, selected: bool) {
        for record in &mut self.records {
            record.selected = selected;
        }
        self.flush();
    }

    /// Remove every selected record; returns how many were removed.
    pub fn remove_selected(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.selected);
        let removed = before - self.records.len();
        if removed > 0 {
            debug!(removed, "Removed selected records");
            self.flush();
        }
        removed
    }

    /// Remove every record; returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        debug!(removed, "Cleared table");
        self.flush();
        removed
    }

    fn flush(&mut self) {
        match self.persistence.save(&self.records) {
            Ok(()) => self.last_flush_failed = false,
            Err(e) => {
                warn!(
                    key = self.persistence.key(),
                    error = %e,
                    "Failed to persist table; in-memory state remains authoritative"
                );
                self.last_flush_failed = true;
            }
        }
    }
}
