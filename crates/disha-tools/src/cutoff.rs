//! The `cutoff` tool.
//!
//! Always regenerates — a fresher answer overwrites the cached row via the
//! (exam, college, course) upsert. The generated value is returned even
//! when one of the three entities is missing from the cache and the row
//! cannot be linked.

use disha_core::{llm::TextModel, name::normalize, store::CounselStore};

use crate::{Error, Result, prompts};

/// Returned in place of a cutoff when generation fails; the front-end
/// renders it verbatim.
const CUTOFF_UNAVAILABLE: &str = "Error fetching cutoff.";

/// The typical cutoff for an (exam, college, course) triple, as free text.
pub async fn cutoff_for<S, M>(
  store: &S,
  model: &M,
  exam: &str,
  college: &str,
  course: &str,
) -> Result<String>
where
  S: CounselStore,
  M: TextModel,
{
  let value = match model.generate(&prompts::cutoff(exam, college, course)).await {
    Ok(text) => normalize(&text),
    Err(err) => {
      tracing::warn!(exam, college, course, error = %err, "cutoff generation failed");
      return Ok(CUTOFF_UNAVAILABLE.to_string());
    }
  };
  if value.is_empty() {
    tracing::warn!(exam, college, course, "empty cutoff reply");
    return Ok(CUTOFF_UNAVAILABLE.to_string());
  }

  let exam_row = store.find_exam(exam).await.map_err(Error::store)?;
  let college_row = store.find_college(college).await.map_err(Error::store)?;
  let course_row = store.find_course(course).await.map_err(Error::store)?;

  match (exam_row, college_row, course_row) {
    (Some(e), Some(col), Some(cr)) => {
      if let Err(err) = store.upsert_cutoff(e.id, col.id, cr.id, value.clone()).await {
        tracing::error!(exam, college, course, error = %err, "failed to save cutoff");
        return Ok(CUTOFF_UNAVAILABLE.to_string());
      }
      tracing::info!(exam, college, course, "cutoff saved");
    }
    _ => {
      tracing::warn!(
        exam,
        college,
        course,
        "cutoff not saved; exam, college, or course missing from cache"
      );
    }
  }

  Ok(value)
}
