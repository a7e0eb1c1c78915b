//! AI-generated summaries of recent eating patterns.
//!
//! The generative-text API is an opaque external capability behind
//! [`Summarizer`]: send recent entries, receive text or an error. The busy
//! gate and the apology substitution belong to the caller, not to the
//! collaborator.

mod gemini;

pub use gemini::{GeminiClient, DEFAULT_MODEL};

use async_trait::async_trait;

use crate::models::MealEntry;

/// User-facing message substituted for any collaborator failure.
pub const INSIGHT_FALLBACK: &str =
    "Lo siento, hubo un error conectando con el nutricionista virtual.";

/// How many of the most recent entries are sent for analysis.
pub const MAX_PROMPT_ENTRIES: usize = 15;

/// External capability producing a natural-language summary of entries.
#[async_trait]
pub trait Summarizer {
    async fn summarize(&self, entries: &[MealEntry]) -> Result<String, InsightError>;
}

/// Builds the analysis prompt from the most recent entries.
///
/// Image payloads are excluded; only id, date, type, content and timestamp
/// are serialized.
pub fn build_prompt(entries: &[MealEntry]) -> String {
    let recent: Vec<serde_json::Value> = entries
        .iter()
        .take(MAX_PROMPT_ENTRIES)
        .map(|e| {
            serde_json::json!({
                "id": e.id,
                "date": e.date,
                "type": e.meal_type,
                "content": e.content,
                "timestamp": e.timestamp,
            })
        })
        .collect();

    format!(
        "Analiza mis registros de comidas recientes y bríndame un resumen amigable \
         sobre mi alimentación.\n\
         Identifica patrones positivos y sugiere 3 pequeñas mejoras saludables \
         basadas en lo que he comido.\n\
         Mantenlo corto, motivador y estructurado.\n\
         Usa emojis. Responde en Español.\n\n\
         Mis datos son:\n{}",
        serde_json::Value::Array(recent)
    )
}

/// Caller-owned state of an insight request.
///
/// Idle -> Pending -> {Success, Failed}. A new request may only begin when
/// no request is pending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InsightState {
    #[default]
    Idle,
    Pending,
    Success(String),
    Failed(String),
}

impl InsightState {
    /// Enters `Pending`. Returns false (and changes nothing) while a
    /// request is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = InsightState::Pending;
        true
    }

    pub fn succeed(&mut self, text: String) {
        *self = InsightState::Success(text);
    }

    pub fn fail(&mut self, error: &InsightError) {
        *self = InsightState::Failed(error.to_string());
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, InsightState::Pending)
    }

    /// Text to show the user: the summary on success, the fixed apology on
    /// failure, nothing otherwise.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            InsightState::Success(text) => Some(text),
            InsightState::Failed(_) => Some(INSIGHT_FALLBACK),
            InsightState::Idle | InsightState::Pending => None,
        }
    }
}

/// Errors from the insight collaborator.
#[derive(Debug)]
pub enum InsightError {
    /// No API key available.
    MissingApiKey,
    /// Transport-level failure.
    Http(String),
    /// The API answered with an error status.
    Api(u16, String),
    /// The API answered without any usable text.
    EmptyResponse,
}

impl std::fmt::Display for InsightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightError::MissingApiKey => write!(
                f,
                "API key not configured. Add api_key to config or set NUTRILOG_API_KEY."
            ),
            InsightError::Http(e) => write!(f, "Request failed: {}", e),
            InsightError::Api(status, body) => {
                write!(f, "API returned status {}: {}", status, body)
            }
            InsightError::EmptyResponse => write!(f, "API returned no text"),
        }
    }
}

impl std::error::Error for InsightError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryImage, MealType};
    use chrono::NaiveDate;

    fn entry(d: &str, meal_type: MealType, content: &str) -> MealEntry {
        let date = NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
        MealEntry::new(date, meal_type, content)
    }

    #[test]
    fn test_build_prompt_limits_to_recent_entries() {
        let entries: Vec<MealEntry> = (1..=20)
            .map(|i| entry(&format!("2024-01-{:02}", i), MealType::Lunch, "Comida"))
            .collect();

        let prompt = build_prompt(&entries);
        assert!(prompt.contains("2024-01-15"));
        assert!(!prompt.contains("2024-01-16"));
    }

    #[test]
    fn test_build_prompt_excludes_image_payloads() {
        let entries = vec![entry("2024-01-01", MealType::Dinner, "Sopa")
            .with_image(EntryImage::new("image/jpeg", vec![9; 64]))];

        let prompt = build_prompt(&entries);
        assert!(prompt.contains("Sopa"));
        assert!(!prompt.contains("base64"));
    }

    #[test]
    fn test_build_prompt_wording() {
        let prompt = build_prompt(&[entry("2024-01-01", MealType::Breakfast, "Avena")]);
        assert!(prompt.contains("Responde en Español"));
        assert!(prompt.contains("Mis datos son:"));
    }

    #[test]
    fn test_state_machine_success_path() {
        let mut state = InsightState::default();
        assert_eq!(state, InsightState::Idle);
        assert!(state.display_text().is_none());

        assert!(state.begin());
        assert!(state.is_pending());

        state.succeed("Buen trabajo 🎉".to_string());
        assert_eq!(state.display_text(), Some("Buen trabajo 🎉"));
    }

    #[test]
    fn test_state_machine_substitutes_apology_on_failure() {
        let mut state = InsightState::default();
        assert!(state.begin());
        state.fail(&InsightError::Http("connection refused".to_string()));

        assert_eq!(state.display_text(), Some(INSIGHT_FALLBACK));
    }

    #[test]
    fn test_busy_gate_forbids_reentry() {
        let mut state = InsightState::default();
        assert!(state.begin());
        assert!(!state.begin());
        assert!(state.is_pending());
    }

    #[test]
    fn test_begin_allowed_after_completion() {
        let mut state = InsightState::default();
        assert!(state.begin());
        state.succeed("ok".to_string());
        assert!(state.begin());
    }
}
