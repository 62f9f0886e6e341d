//! The `subject` tool.

use disha_core::{
  llm::TextModel,
  parse::{ListStyle, parse_list},
  store::CounselStore,
};

use crate::{Error, Result, prompts};

/// Subjects taught under a stream, from cache or freshly generated.
///
/// When the group itself is not cached the parsed list is still returned,
/// just not persisted — the rows could not be linked to a group anyway.
pub async fn subjects_for_group<S, M>(
  store: &S,
  model: &M,
  group: &str,
) -> Result<Vec<String>>
where
  S: CounselStore,
  M: TextModel,
{
  let cached_group = store.find_subject_group(group).await.map_err(Error::store)?;

  if let Some(ref g) = cached_group {
    let cached = store.subjects_of_group(g.id).await.map_err(Error::store)?;
    if !cached.is_empty() {
      tracing::debug!(group, count = cached.len(), "subjects served from cache");
      return Ok(cached.into_iter().map(|s| s.name).collect());
    }
  } else {
    tracing::warn!(group, "group not cached; subjects will not be persisted");
  }

  let text = match model.generate(&prompts::subjects(group)).await {
    Ok(text) => text,
    Err(err) => {
      tracing::warn!(group, error = %err, "subject generation failed");
      return Ok(Vec::new());
    }
  };

  let subjects = match parse_list(&text, ListStyle::Numbered) {
    Ok(subjects) => subjects,
    Err(err) => {
      tracing::warn!(group, error = %err, "unparseable subject reply");
      return Ok(Vec::new());
    }
  };

  if let Some(g) = cached_group {
    if let Err(err) = store
      .insert_subjects(g.id, g.name.clone(), subjects.clone())
      .await
    {
      tracing::error!(group, error = %err, "failed to cache subjects");
      return Ok(Vec::new());
    }
    tracing::info!(group, count = subjects.len(), "subjects generated and cached");
  }

  Ok(subjects)
}
