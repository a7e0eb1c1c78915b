use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use nutrilog::app::App;
use nutrilog::commands::{
    ConfigCommand, DeleteCommand, DeleteDayCommand, ExportCommand, HistoryCommand,
    InsightsCommand, LogCommand,
};
use nutrilog::config::Config;
use nutrilog::store::EntryStore;

#[derive(Parser)]
#[command(name = "nutrilog")]
#[command(version)]
#[command(about = "A personal meal journal", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a meal for one of the day's slots
    Log(LogCommand),

    /// Browse the date-grouped history
    History(HistoryCommand),

    /// Delete a single entry by id
    Delete(DeleteCommand),

    /// Delete every entry of a day
    DeleteDay(DeleteDayCommand),

    /// Export the history (CSV or printable report)
    Export(ExportCommand),

    /// AI summary of recent eating patterns
    Insights(InsightsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutrilog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match &cli.command {
        Some(Commands::Log(cmd)) => {
            let mut app = App::load(EntryStore::new(config.data_dir.value.clone()));
            cmd.run(&mut app)
        }
        Some(Commands::History(cmd)) => {
            let app = App::load(EntryStore::new(config.data_dir.value.clone()));
            cmd.run(&app)
        }
        Some(Commands::Delete(cmd)) => {
            let mut app = App::load(EntryStore::new(config.data_dir.value.clone()));
            cmd.run(&mut app)
        }
        Some(Commands::DeleteDay(cmd)) => {
            let mut app = App::load(EntryStore::new(config.data_dir.value.clone()));
            cmd.run(&mut app)
        }
        Some(Commands::Export(cmd)) => {
            let app = App::load(EntryStore::new(config.data_dir.value.clone()));
            cmd.run(&app)
        }
        Some(Commands::Insights(cmd)) => {
            let app = App::load(EntryStore::new(config.data_dir.value.clone()));
            cmd.run(&app, &config)
        }
        Some(Commands::Config(cmd)) => cmd.run(&config),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}
