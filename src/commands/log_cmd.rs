use chrono::Local;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::App;
use crate::models::{EntryImage, MealEntry, MealType};

use super::parse_date;

/// Log a meal
#[derive(Args)]
pub struct LogCommand {
    /// What was eaten
    pub content: String,

    /// Meal type (breakfast, lunch, snack, dinner, extras)
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub meal_type: String,

    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    pub date: Option<String>,

    /// Attach a photo (jpg, png, webp or gif, already downscaled)
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl LogCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        let date = match &self.date {
            Some(d) => parse_date(d)?,
            None => Local::now().date_naive(),
        };
        let meal_type: MealType = self.meal_type.parse().map_err(|e: String| e)?;

        let mut entry = MealEntry::new(date, meal_type, self.content.as_str());
        if let Some(path) = &self.image {
            entry = entry.with_image(load_image(path)?);
        }

        app.save_entry(entry)?;

        println!(
            "Guardado: {} {} — {}",
            meal_type.icon(),
            meal_type.label(),
            date
        );
        Ok(())
    }
}

fn load_image(path: &Path) -> Result<EntryImage, Box<dyn std::error::Error>> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        other => {
            return Err(format!(
                "Unsupported image type '{}'. Use jpg, png, webp or gif.",
                other
            )
            .into())
        }
    };

    let bytes = fs::read(path)?;
    Ok(EntryImage::new(mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_image_guesses_mime() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.JPG");
        fs::write(&path, [0xff, 0xd8]).unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.mime, "image/jpeg");
        assert_eq!(image.bytes, vec![0xff, 0xd8]);
    }

    #[test]
    fn test_load_image_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.bmp");
        fs::write(&path, [0]).unwrap();

        assert!(load_image(&path).is_err());
    }
}
