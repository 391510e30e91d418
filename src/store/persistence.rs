//! Record persistence over a key-value storage port.
//!
//! The whole table is stored as one JSON array under a single well-known key.
//! Reads never fail from the caller's point of view: a missing or unparseable
//! value loads as an empty table.

use crate::error::StorageError;
use crate::record::Record;
use crate::types::RecordId;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default storage key for the table payload
pub const DEFAULT_TABLE_KEY: &str = "tableData";

/// Key-value storage port: text values addressed by string keys
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// On-disk key-value storage backed by sled
pub struct SledStorage {
    db: sled::Db,
}

impl SledStorage {
    /// Open (or create) a sled database at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Ok(Self { db })
    }

}

impl KeyValueStorage for SledStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    StorageError::Backend(format!("Value under {} is not UTF-8: {}", key, e))
                })?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }
}

/// In-memory key-value storage with an optional per-value size quota.
///
/// A write larger than the quota fails the way a full browser storage area
/// does, leaving the previous value in place.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects values longer than `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Storage pre-populated with a raw value
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    quota,
                });
            }
        }
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persistence adapter: reads and writes the record table under one key
#[derive(Clone)]
pub struct RecordPersistence {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl RecordPersistence {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Persistence over a fresh in-memory storage under the default key
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), DEFAULT_TABLE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored table. Absent, unreadable, or malformed data yields an
    /// empty table.
    pub fn load(&self) -> Vec<Record> {
        self.load_table().records
    }

    /// Load the stored table and report how many records were given a fresh
    /// id on the way in, either because the payload had none or because the
    /// id was already taken by an earlier record.
    pub fn load_table(&self) -> LoadedTable {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored table, starting empty");
                return LoadedTable::default();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored table, starting empty");
                return LoadedTable::default();
            }
        };

        let (mut records, missing) = match decode_table(&raw) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored table is not valid, starting empty");
                return LoadedTable::default();
            }
        };
        if missing > 0 {
            debug!(key = %self.key, missing, "Assigned ids to stored records without one");
        }

        let mut duplicates = 0;
        let mut seen = HashSet::new();
        for record in &mut records {
            if !seen.insert(record.id) {
                let fresh = RecordId::generate();
                warn!(duplicate = %record.id, replacement = %fresh, "Duplicate record id in stored table");
                record.id = fresh;
                seen.insert(fresh);
                duplicates += 1;
            }
        }

        debug!(key = %self.key, count = records.len(), "Loaded stored table");
        LoadedTable {
            records,
            ids_assigned: missing + duplicates,
        }
    }

    /// Serialize and write the whole table.
    pub fn save(&self, records: &[Record]) -> Result<(), StorageError> {
        let payload = encode_records(records)?;
        self.storage.set(&self.key, &payload)
    }
}

/// Result of reading the stored table
#[derive(Debug, Default)]
pub struct LoadedTable {
    pub records: Vec<Record>,
    /// Records whose stored id was missing or duplicated and replaced in memory
    pub ids_assigned: usize,
}

/// Encode records as the persisted JSON array
pub fn encode_records(records: &[Record]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(records)?)
}

/// Decode the persisted JSON array. A JSON `null` reads as an empty table.
pub fn decode_records(raw: &str) -> Result<Vec<Record>, StorageError> {
    Ok(decode_table(raw)?.0)
}

/// Decode the persisted JSON array, also counting entries stored without an
/// `id` (those receive a generated one).
fn decode_table(raw: &str) -> Result<(Vec<Record>, usize), StorageError> {
    let parsed: Option<Vec<serde_json::Value>> = serde_json::from_str(raw)?;
    let values = parsed.unwrap_or_default();
    let missing = values.iter().filter(|v| v.get("id").is_none()).count();
    let records = values
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Record>, _>>()?;
    Ok((records, missing))
}
