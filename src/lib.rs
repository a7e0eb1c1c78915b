//! NutriLog Core Library
//!
//! Meal journal storage, report transformations and the AI insight
//! capability.

pub mod app;
pub mod commands;
pub mod config;
pub mod insight;
pub mod models;
pub mod report;
pub mod store;

pub use app::App;
pub use config::{Config, ConfigError, ConfigSource, ConfigValue, InsightConfig};
pub use insight::{
    build_prompt, GeminiClient, InsightError, InsightState, Summarizer, INSIGHT_FALLBACK,
    MAX_PROMPT_ENTRIES,
};
pub use models::{entry_id, EntryImage, ImageError, MealEntry, MealType};
pub use report::csv::{csv_file_name, render_csv, CSV_HEADERS};
pub use report::pdf::{
    compose_report, export_pdf, page_bands, render_html, slice_pages, ExportFile, PageBand,
    PageImage, PdfBackend, Raster, ReportDocument,
};
pub use report::{group_by_date, DateOrder, DayGroup, ExportError};
pub use store::{EntryStore, StoreError, STORAGE_FILE};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
