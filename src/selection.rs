//! Selection Coordinator
//!
//! Row selection lives only in each record's `selected` flag. The header
//! "select all" checkbox is derived from the full record sequence on every
//! read, so it cannot drift from the rows after filtering or deletes.
//! Select-all always spans every record, including rows hidden by filters.

use crate::record::Record;
use crate::store::RecordStore;
use crate::types::RecordId;

/// Derived aggregate: true iff the table is non-empty and every record is selected.
pub fn select_all(records: &[Record]) -> bool {
    !records.is_empty() && records.iter().all(|r| r.selected)
}

pub fn selected_count(records: &[Record]) -> usize {
    records.iter().filter(|r| r.selected).count()
}

/// Set one row's checkbox. Returns false if `id` is not in the store.
pub fn toggle_one(store: &mut RecordStore, id: &RecordId, checked: bool) -> bool {
    store.set_selection(id, checked)
}

/// Header checkbox click: set every row to `!current_select_all` and return
/// the new aggregate value.
pub fn toggle_all(store: &mut RecordStore, current_select_all: bool) -> bool {
    store.set_all_selection(!current_select_all);
    select_all(store.records())
}
