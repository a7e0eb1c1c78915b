//! Report transformations over the entry list.
//!
//! Grouping reshapes the flat entry list into calendar-oriented day groups;
//! the `csv` and `pdf` submodules render those groups into the two export
//! formats.

pub mod csv;
pub mod pdf;

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{MealEntry, MealType};

/// Date ordering of the grouped output: descending for interactive history
/// and CSV, ascending for the printable report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    Ascending,
    Descending,
}

/// All entries of a single day, one optional slot per meal type.
///
/// The slot array is indexed by the canonical meal order, so a missing meal
/// is an explicit `None` rather than an absent map key.
#[derive(Debug, Clone)]
pub struct DayGroup {
    pub date: NaiveDate,
    slots: [Option<MealEntry>; MealType::COUNT],
}

impl DayGroup {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slots: [None, None, None, None, None],
        }
    }

    fn set(&mut self, entry: MealEntry) {
        let idx = entry.meal_type.index();
        self.slots[idx] = Some(entry);
    }

    pub fn get(&self, meal_type: MealType) -> Option<&MealEntry> {
        self.slots[meal_type.index()].as_ref()
    }

    /// Entries present on this day, in canonical meal order.
    pub fn present(&self) -> impl Iterator<Item = &MealEntry> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }
}

/// Partitions entries into day groups, ordered by calendar date.
pub fn group_by_date(entries: &[MealEntry], order: DateOrder) -> Vec<DayGroup> {
    let mut by_date: BTreeMap<NaiveDate, DayGroup> = BTreeMap::new();
    for entry in entries {
        by_date
            .entry(entry.date)
            .or_insert_with(|| DayGroup::new(entry.date))
            .set(entry.clone());
    }

    let groups: Vec<DayGroup> = by_date.into_values().collect();
    match order {
        DateOrder::Ascending => groups,
        DateOrder::Descending => groups.into_iter().rev().collect(),
    }
}

/// Errors from the export renderers.
#[derive(Debug)]
pub enum ExportError {
    /// CSV writer failure.
    Csv(String),
    /// A raster buffer did not match its declared dimensions.
    InvalidRaster { expected: usize, actual: usize },
    /// The rendering backend failed.
    Backend(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Csv(e) => write!(f, "CSV export failed: {}", e),
            ExportError::InvalidRaster { expected, actual } => write!(
                f,
                "Raster buffer size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            ExportError::Backend(e) => write!(f, "Rendering backend failed: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}
