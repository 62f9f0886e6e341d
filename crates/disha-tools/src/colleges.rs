//! The `college` tool.
//!
//! Colleges are regenerated on every call (no cache read), but the parsed
//! rows are persisted — exam and cutoff lookups need the college ids.

use disha_core::{llm::TextModel, parse::parse_college_list, store::CounselStore};

use crate::{Result, prompts};

/// Colleges offering a course, with their state section and rating
/// persisted. Returns college names only.
pub async fn colleges_for_course<S, M>(
  store: &S,
  model: &M,
  course: &str,
) -> Result<Vec<String>>
where
  S: CounselStore,
  M: TextModel,
{
  let text = match model.generate(&prompts::colleges(course)).await {
    Ok(text) => text,
    Err(err) => {
      tracing::warn!(course, error = %err, "college generation failed");
      return Ok(Vec::new());
    }
  };

  let colleges = match parse_college_list(&text) {
    Ok(colleges) => colleges,
    Err(err) => {
      tracing::warn!(course, error = %err, "unparseable college reply");
      return Ok(Vec::new());
    }
  };

  let names: Vec<String> = colleges.iter().map(|c| c.name.clone()).collect();

  if let Err(err) = store.insert_colleges(course.to_string(), colleges).await {
    tracing::error!(course, error = %err, "failed to cache colleges");
    return Ok(Vec::new());
  }

  tracing::info!(course, count = names.len(), "colleges generated and cached");
  Ok(names)
}
