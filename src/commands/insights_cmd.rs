use clap::Args;

use crate::app::App;
use crate::config::Config;
use crate::insight::{GeminiClient, InsightError, InsightState, Summarizer};

/// Generate an AI summary of recent eating patterns
#[derive(Args)]
pub struct InsightsCommand {}

impl InsightsCommand {
    pub fn run(&self, app: &App, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        if app.entries().is_empty() {
            println!(
                "Registra al menos una comida para habilitar el análisis de \
                 inteligencia artificial."
            );
            return Ok(());
        }

        let api_key = config
            .insight
            .api_key
            .clone()
            .ok_or(InsightError::MissingApiKey)?;
        let client = GeminiClient::new(api_key, config.insight.model().to_string())?;

        let mut state = InsightState::default();
        if !state.begin() {
            return Ok(());
        }

        println!("Analizando tu dieta...");

        let rt = tokio::runtime::Runtime::new()?;
        match rt.block_on(client.summarize(app.entries())) {
            Ok(text) => state.succeed(text),
            Err(e) => {
                tracing::warn!("Insight request failed: {}", e);
                state.fail(&e);
            }
        }

        if let Some(text) = state.display_text() {
            println!();
            println!("{}", text);
        }
        Ok(())
    }
}
