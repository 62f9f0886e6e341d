//! The `subject_group` tool.

use disha_core::{
  llm::TextModel,
  parse::{ListStyle, parse_list},
  store::CounselStore,
};

use crate::{Error, Result, prompts};

/// The number of streams the prompt asks for; longer replies are truncated.
const STREAM_COUNT: usize = 6;

/// List the Indian 12th-standard streams, from cache or freshly generated.
pub async fn subject_groups<S, M>(store: &S, model: &M) -> Result<Vec<String>>
where
  S: CounselStore,
  M: TextModel,
{
  let cached = store.list_subject_groups().await.map_err(Error::store)?;
  if !cached.is_empty() {
    tracing::debug!(count = cached.len(), "subject groups served from cache");
    return Ok(cached.into_iter().map(|g| g.name).collect());
  }

  let text = match model.generate(&prompts::subject_groups()).await {
    Ok(text) => text,
    Err(err) => {
      tracing::warn!(error = %err, "subject group generation failed");
      return Ok(Vec::new());
    }
  };

  let mut groups = match parse_list(&text, ListStyle::Plain) {
    Ok(groups) => groups,
    Err(err) => {
      tracing::warn!(error = %err, "unparseable subject group reply");
      return Ok(Vec::new());
    }
  };
  groups.truncate(STREAM_COUNT);

  if let Err(err) = store.insert_subject_groups(groups.clone()).await {
    tracing::error!(error = %err, "failed to cache subject groups");
    return Ok(Vec::new());
  }

  tracing::info!(count = groups.len(), "subject groups generated and cached");
  Ok(groups)
}
