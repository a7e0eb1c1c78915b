use chrono::NaiveDate;
use clap::Args;
use std::io::{self, Write};

use crate::app::App;

use super::parse_date;

/// Delete a single entry by id
#[derive(Args)]
pub struct DeleteCommand {
    /// Entry id (e.g. 2024-01-05-desayuno)
    pub id: String,
}

impl DeleteCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        let exists = app.entries().iter().any(|e| e.id == self.id);
        app.delete_entry(&self.id)?;

        if exists {
            println!("Entrada eliminada: {}", self.id);
        } else {
            println!("No existe la entrada: {}", self.id);
        }
        Ok(())
    }
}

/// Delete every entry of a day (asks for confirmation)
#[derive(Args)]
pub struct DeleteDayCommand {
    /// Date (YYYY-MM-DD)
    pub date: String,
}

impl DeleteDayCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        let date = parse_date(&self.date)?;

        let deleted = app.delete_day(date, &mut confirm_on_stdin)?;
        if deleted {
            println!("Día eliminado: {}", date);
        } else {
            println!("Cancelado.");
        }
        Ok(())
    }
}

/// Blocking yes/no gate keyed on the date being deleted.
fn confirm_on_stdin(date: NaiveDate) -> bool {
    print!("¿Estás seguro de eliminar todo el día {}? [y/N] ", date);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}
