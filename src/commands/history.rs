use clap::{Args, ValueEnum};

use crate::app::App;
use crate::models::MealType;
use crate::report::pdf::spanish_heading;
use crate::report::{group_by_date, DateOrder};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Browse the date-grouped meal history
#[derive(Args)]
pub struct HistoryCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl HistoryCommand {
    pub fn run(&self, app: &App) -> Result<(), Box<dyn std::error::Error>> {
        let entries = app.entries();

        if entries.is_empty() {
            println!("Historial vacío. Empieza a registrar tus comidas una a una.");
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(entries)?);
            }
            OutputFormat::Text => {
                for group in group_by_date(entries, DateOrder::Descending) {
                    println!("{} — {}", group.date, spanish_heading(group.date));
                    println!("{}", "-".repeat(60));

                    for meal_type in MealType::ALL {
                        match group.get(meal_type) {
                            Some(entry) => {
                                let photo = if entry.image.is_some() { " [foto]" } else { "" };
                                println!(
                                    "  {} {:10} {}{}",
                                    meal_type.icon(),
                                    meal_type.label(),
                                    entry.content,
                                    photo
                                );
                            }
                            None => {
                                println!(
                                    "  {} {:10} (vacío)",
                                    meal_type.icon(),
                                    meal_type.label()
                                );
                            }
                        }
                    }
                    println!();
                }

                println!("Total: {} comida(s)", entries.len());
            }
        }

        Ok(())
    }
}
