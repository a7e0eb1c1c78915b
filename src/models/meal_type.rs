use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five meal slots a day can hold, in canonical order.
///
/// Serialized with the Spanish wire values used by the durable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    #[serde(rename = "desayuno")]
    Breakfast,
    #[serde(rename = "almuerzo")]
    Lunch,
    #[serde(rename = "merienda")]
    Snack,
    #[serde(rename = "cena")]
    Dinner,
    #[serde(rename = "extras")]
    Extras,
}

impl MealType {
    /// Number of meal slots in a day.
    pub const COUNT: usize = 5;

    /// All meal types in canonical order: breakfast, lunch, snack, dinner, extras.
    pub const ALL: [MealType; MealType::COUNT] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Snack,
        MealType::Dinner,
        MealType::Extras,
    ];

    /// Position of this slot in the canonical order.
    pub fn index(&self) -> usize {
        match self {
            MealType::Breakfast => 0,
            MealType::Lunch => 1,
            MealType::Snack => 2,
            MealType::Dinner => 3,
            MealType::Extras => 4,
        }
    }

    /// Wire value used in the durable record and in entry ids.
    pub fn wire_value(&self) -> &'static str {
        match self {
            MealType::Breakfast => "desayuno",
            MealType::Lunch => "almuerzo",
            MealType::Snack => "merienda",
            MealType::Dinner => "cena",
            MealType::Extras => "extras",
        }
    }

    /// Display label for history views and export column headers.
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Desayuno",
            MealType::Lunch => "Almuerzo",
            MealType::Snack => "Merienda",
            MealType::Dinner => "Cena",
            MealType::Extras => "Extras",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MealType::Breakfast => "☕",
            MealType::Lunch => "🍲",
            MealType::Snack => "🥪",
            MealType::Dinner => "🥗",
            MealType::Extras => "🍎",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_value())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" | "desayuno" => Ok(MealType::Breakfast),
            "lunch" | "almuerzo" => Ok(MealType::Lunch),
            "snack" | "merienda" => Ok(MealType::Snack),
            "dinner" | "cena" => Ok(MealType::Dinner),
            "extras" => Ok(MealType::Extras),
            _ => Err(format!(
                "Invalid meal type '{}'. Valid options: breakfast, lunch, snack, dinner, extras",
                s
            )),
        }
    }
}
