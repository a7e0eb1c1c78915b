//! Durable storage for meal entries.
//!
//! The whole collection lives in a single JSON file under the data
//! directory; every mutation rewrites the file in full. There are no
//! partial writes and no second copy of the data anywhere else.

use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::models::MealEntry;

/// File name of the durable record. The `v2` suffix is the schema
/// generation marker.
pub const STORAGE_FILE: &str = "nutrilog_entries_v2.json";

/// Durable CRUD over the meal entry collection.
///
/// Upserts are keyed by (date, meal type): saving a second entry for the
/// same pair overwrites the first while keeping its original id.
#[derive(Debug, Clone)]
pub struct EntryStore {
    data_dir: PathBuf,
}

impl EntryStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the full path of the record file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    /// Returns all entries sorted descending by timestamp (most recent
    /// save first).
    ///
    /// Never fails: a missing, unreadable or unparseable record degrades to
    /// an empty list. Corruption is logged and accepted in favor of
    /// availability.
    pub fn list(&self) -> Vec<MealEntry> {
        let path = self.path();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        let mut entries: Vec<MealEntry> = match serde_json::from_str(&data) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    /// Inserts the entry, or overwrites the existing entry for the same
    /// (date, meal type) pair keeping its original id.
    ///
    /// Entries with empty or whitespace-only content are rejected before
    /// anything is written.
    pub fn upsert(&self, entry: MealEntry) -> Result<(), StoreError> {
        if entry.content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }

        let mut entries = self.list();
        match entries
            .iter_mut()
            .find(|e| e.date == entry.date && e.meal_type == entry.meal_type)
        {
            Some(existing) => {
                // Keep the original id
                existing.content = entry.content;
                existing.timestamp = entry.timestamp;
                existing.image = entry.image;
            }
            None => entries.insert(0, entry),
        }

        self.write(&entries)
    }

    /// Removes the entry with this id. A missing id is a no-op, not an
    /// error.
    pub fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut entries = self.list();
        entries.retain(|e| e.id != id);
        self.write(&entries)
    }

    /// Removes every entry logged for the given date.
    pub fn delete_by_date(&self, date: NaiveDate) -> Result<(), StoreError> {
        let mut entries = self.list();
        entries.retain(|e| e.date != date);
        self.write(&entries)
    }

    fn write(&self, entries: &[MealEntry]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StoreError::Io(self.data_dir.clone(), e))?;

        let json = serde_json::to_string(entries).map_err(StoreError::Serialize)?;
        let path = self.path();
        fs::write(&path, json).map_err(|e| StoreError::Io(path, e))
    }
}

/// Errors that can occur while writing the entry collection.
///
/// Reads never fail (see [`EntryStore::list`]); a failed write must surface
/// to the caller, since dropping a just-entered meal would be silent data
/// loss.
#[derive(Debug)]
pub enum StoreError {
    /// Entry content is empty or whitespace-only.
    EmptyContent,
    /// I/O error reading or writing the record file.
    Io(PathBuf, io::Error),
    /// Failed to serialize the collection.
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::EmptyContent => write!(f, "Meal content cannot be empty"),
            StoreError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StoreError::Serialize(e) => write!(f, "Failed to serialize entries: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::EmptyContent => None,
            StoreError::Io(_, e) => Some(e),
            StoreError::Serialize(e) => Some(e),
        }
    }
}
