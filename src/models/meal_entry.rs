use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entry_image::EntryImage;
use super::meal_type::MealType;

/// One logged meal: what was eaten in a given slot on a given day.
///
/// The id is built from the (date, meal type) pair, which makes that pair a
/// natural key, but it is stored and compared as an opaque string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub content: String,
    /// Creation/update instant in milliseconds since the epoch. Only used
    /// for default list ordering.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EntryImage>,
}

/// Canonical id for a (date, meal type) pair.
pub fn entry_id(date: NaiveDate, meal_type: MealType) -> String {
    format!("{}-{}", date, meal_type)
}

impl MealEntry {
    /// Creates an entry for the given slot, trimming the content and
    /// stamping the current time.
    pub fn new(date: NaiveDate, meal_type: MealType, content: impl Into<String>) -> Self {
        Self {
            id: entry_id(date, meal_type),
            date,
            meal_type,
            content: content.into().trim().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: EntryImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }
}
