//! The `interest` tool.
//!
//! Interests are regenerated on every call (no cache read) but persisted
//! and linked to their subjects, so the junction table still accretes.

use disha_core::{
  llm::TextModel,
  parse::{ListStyle, parse_list},
  store::CounselStore,
};

use crate::{Error, Result, prompts};

/// Career interests derived from a set of selected subjects.
///
/// The persisted interests inherit the category of the first selected
/// subject that is present in the store.
pub async fn interests_for_subjects<S, M>(
  store: &S,
  model: &M,
  subjects: &[String],
) -> Result<Vec<String>>
where
  S: CounselStore,
  M: TextModel,
{
  if subjects.is_empty() {
    return Ok(Vec::new());
  }

  let text = match model.generate(&prompts::interests(subjects)).await {
    Ok(text) => text,
    Err(err) => {
      tracing::warn!(error = %err, "interest generation failed");
      return Ok(Vec::new());
    }
  };

  let interests = match parse_list(&text, ListStyle::Bulleted) {
    Ok(interests) => interests,
    Err(err) => {
      tracing::warn!(error = %err, "unparseable interest reply");
      return Ok(Vec::new());
    }
  };

  // Category tie-break: the first subject's category, if it is cached.
  let category = match store.find_subject(&subjects[0]).await.map_err(Error::store)? {
    Some(subject) => subject.category,
    None => {
      tracing::warn!(subject = %subjects[0], "first subject not cached; interests get no category");
      None
    }
  };

  if let Err(err) = store
    .insert_interests(category, interests.clone(), subjects.to_vec())
    .await
  {
    tracing::error!(error = %err, "failed to cache interests");
    return Ok(Vec::new());
  }

  tracing::info!(count = interests.len(), "interests generated and linked");
  Ok(interests)
}
