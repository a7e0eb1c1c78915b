//! Application shell: routes actions to the store and owns the read cache.

use chrono::NaiveDate;

use crate::models::MealEntry;
use crate::store::{EntryStore, StoreError};

/// Single owner of the in-memory entry list.
///
/// The cache is a read-through copy of [`EntryStore::list`]: after every
/// mutating call it is replaced in full, never patched, so the store stays
/// the sole source of truth.
pub struct App {
    store: EntryStore,
    entries: Vec<MealEntry>,
}

impl App {
    pub fn load(store: EntryStore) -> Self {
        let entries = store.list();
        Self { store, entries }
    }

    /// Current cached entry list, most recent save first.
    pub fn entries(&self) -> &[MealEntry] {
        &self.entries
    }

    pub fn save_entry(&mut self, entry: MealEntry) -> Result<(), StoreError> {
        self.store.upsert(entry)?;
        self.refresh();
        Ok(())
    }

    pub fn delete_entry(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.delete_by_id(id)?;
        self.refresh();
        Ok(())
    }

    /// Deletes every entry of a day after passing the confirmation gate.
    ///
    /// The gate receives the literal date being deleted; a declined gate
    /// leaves the store untouched and returns `Ok(false)`.
    pub fn delete_day(
        &mut self,
        date: NaiveDate,
        confirm: &mut dyn FnMut(NaiveDate) -> bool,
    ) -> Result<bool, StoreError> {
        if !confirm(date) {
            return Ok(false);
        }
        self.store.delete_by_date(date)?;
        self.refresh();
        Ok(true)
    }

    fn refresh(&mut self) {
        self.entries = self.store.list();
    }
}
