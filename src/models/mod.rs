mod entry_image;
mod meal_entry;
mod meal_type;

pub use entry_image::{EntryImage, ImageError};
pub use meal_entry::{entry_id, MealEntry};
pub use meal_type::MealType;
