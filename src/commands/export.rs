use chrono::Local;
use clap::{Args, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::app::App;
use crate::report::csv::{csv_file_name, render_csv};
use crate::report::pdf::{compose_report, render_html, report_file_name};

use super::parse_date;

/// Export the history
#[derive(Args)]
pub struct ExportCommand {
    #[command(subcommand)]
    pub command: ExportSubcommand,
}

#[derive(Subcommand)]
pub enum ExportSubcommand {
    /// Export the full history as CSV (one row per day)
    Csv {
        /// Output directory (defaults to the current directory)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Export a printable report for a date range
    Report {
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: String,

        /// Output directory (defaults to the current directory)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

impl ExportCommand {
    pub fn run(&self, app: &App) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ExportSubcommand::Csv { out } => self.export_csv(app, out),
            ExportSubcommand::Report { from, to, out } => self.export_report(app, from, to, out),
        }
    }

    fn export_csv(
        &self,
        app: &App,
        out: &Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let bytes = match render_csv(app.entries())? {
            Some(bytes) => bytes,
            None => {
                println!("No hay comidas registradas para exportar.");
                return Ok(());
            }
        };

        let path = out_dir(out).join(csv_file_name(Local::now().date_naive()));
        fs::write(&path, bytes)?;
        println!("Exportado: {}", path.display());
        Ok(())
    }

    fn export_report(
        &self,
        app: &App,
        from: &str,
        to: &str,
        out: &Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let from = parse_date(from)?;
        let to = parse_date(to)?;

        let document = match compose_report(app.entries(), from, to) {
            Some(document) => document,
            None => {
                println!("No hay comidas entre {} y {}.", from, to);
                return Ok(());
            }
        };

        let path = out_dir(out).join(report_file_name(from, to));
        fs::write(&path, render_html(&document))?;
        println!("Exportado: {}", path.display());
        Ok(())
    }
}

fn out_dir(out: &Option<PathBuf>) -> PathBuf {
    out.clone().unwrap_or_else(|| PathBuf::from("."))
}
