//! The `course` tool.

use disha_core::{
  llm::TextModel,
  parse::{ListStyle, parse_list},
  store::CounselStore,
};

use crate::{Error, Result, prompts};

/// Undergraduate programs matching a set of interests and a stream, from
/// cache (keyed on the stream) or freshly generated.
pub async fn courses_for<S, M>(
  store: &S,
  model: &M,
  interests: &[String],
  group: &str,
) -> Result<Vec<String>>
where
  S: CounselStore,
  M: TextModel,
{
  let cached_group = store.find_subject_group(group).await.map_err(Error::store)?;

  if let Some(ref g) = cached_group {
    let cached = store.courses_of_group(g.id).await.map_err(Error::store)?;
    if !cached.is_empty() {
      tracing::debug!(group, count = cached.len(), "courses served from cache");
      return Ok(cached.into_iter().map(|c| c.name).collect());
    }
  }

  let text = match model.generate(&prompts::courses(interests, group)).await {
    Ok(text) => text,
    Err(err) => {
      tracing::warn!(group, error = %err, "course generation failed");
      return Ok(Vec::new());
    }
  };

  let courses = match parse_list(&text, ListStyle::Numbered) {
    Ok(courses) => courses,
    Err(err) => {
      tracing::warn!(group, error = %err, "unparseable course reply");
      return Ok(Vec::new());
    }
  };

  let (group_id, category) = match cached_group {
    Some(g) => (Some(g.id), g.name),
    None => (None, group.to_string()),
  };
  if let Err(err) = store
    .insert_courses(group_id, category, courses.clone())
    .await
  {
    tracing::error!(group, error = %err, "failed to cache courses");
    return Ok(Vec::new());
  }

  tracing::info!(group, count = courses.len(), "courses generated and cached");
  Ok(courses)
}
