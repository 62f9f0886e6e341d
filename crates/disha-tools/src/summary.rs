//! The `summary` tool — pure generation, nothing persisted.

use disha_core::llm::TextModel;
use serde::Deserialize;

use crate::prompts;

const SUMMARY_UNAVAILABLE: &str =
  "The career path summary could not be generated at this time.";

/// The full selection, as sent by the wizard once it reaches the final
/// step. All fields default so older front-end revisions that send fewer
/// fields still work.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryInput {
  #[serde(default)]
  pub group:    String,
  #[serde(default)]
  pub subjects: Vec<String>,
  #[serde(default)]
  pub interest: Vec<String>,
  #[serde(default)]
  pub course:   String,
  #[serde(default)]
  pub college:  String,
  #[serde(default)]
  pub exam:     String,
  #[serde(default)]
  pub cutoff:   String,
}

/// A prose paragraph synthesizing the selected path.
pub async fn career_summary<M>(model: &M, input: &SummaryInput) -> String
where
  M: TextModel,
{
  match model.generate(&prompts::summary(input)).await {
    Ok(text) => text.trim().to_string(),
    Err(err) => {
      tracing::warn!(error = %err, "summary generation failed");
      SUMMARY_UNAVAILABLE.to_string()
    }
  }
}
