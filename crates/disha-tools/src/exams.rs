//! The `exam` tool.

use disha_core::{
  llm::TextModel,
  parse::{ListStyle, parse_list},
  store::CounselStore,
};

use crate::{Error, Result, prompts};

/// Strip a trailing parenthetical: `"JEE Main (national level)"` →
/// `"JEE Main"`.
fn strip_parenthetical(name: &str) -> String {
  let name = name.trim();
  if let Some(open) = name.rfind(" (")
    && name.ends_with(')')
  {
    return name[..open].trim_end().to_string();
  }
  name.to_string()
}

/// Entrance exams for a college/course pair, from cache (keyed on the
/// college) or freshly generated.
///
/// On a miss the caller gets the full reply text per exam; the cached rows
/// carry the parenthetical-stripped names, so subsequent hits serve those.
pub async fn exams_for<S, M>(
  store: &S,
  model: &M,
  college: &str,
  course: &str,
) -> Result<Vec<String>>
where
  S: CounselStore,
  M: TextModel,
{
  let cached_college = store.find_college(college).await.map_err(Error::store)?;

  if let Some(ref c) = cached_college {
    let cached = store.exams_of_college(c.id).await.map_err(Error::store)?;
    if !cached.is_empty() {
      tracing::debug!(college, count = cached.len(), "exams served from cache");
      return Ok(cached.into_iter().map(|e| e.name).collect());
    }
  } else {
    tracing::warn!(college, "college not cached; exams will not be persisted");
  }

  let text = match model.generate(&prompts::exams(college, course)).await {
    Ok(text) => text,
    Err(err) => {
      tracing::warn!(college, error = %err, "exam generation failed");
      return Ok(Vec::new());
    }
  };

  let parsed = match parse_list(&text, ListStyle::Numbered) {
    Ok(parsed) => parsed,
    Err(err) => {
      tracing::warn!(college, error = %err, "unparseable exam reply");
      return Ok(Vec::new());
    }
  };

  if let Some(c) = cached_college {
    let stripped: Vec<String> =
      parsed.iter().map(|e| strip_parenthetical(e)).collect();
    if let Err(err) = store.insert_exams(c.id, stripped).await {
      tracing::error!(college, error = %err, "failed to cache exams");
      return Ok(Vec::new());
    }
    tracing::info!(college, count = parsed.len(), "exams generated and cached");
  }

  Ok(parsed)
}
