mod config_cmd;
mod delete;
mod export;
mod history;
mod insights_cmd;
mod log_cmd;

pub use config_cmd::ConfigCommand;
pub use delete::{DeleteCommand, DeleteDayCommand};
pub use export::ExportCommand;
pub use history::HistoryCommand;
pub use insights_cmd::InsightsCommand;
pub use log_cmd::LogCommand;

use chrono::NaiveDate;

/// Parses a `YYYY-MM-DD` command-line date.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", s))
}
