//! The tool dispatcher behind `POST /api/tool`.
//!
//! | Tool | Input | Result |
//! |------|-------|--------|
//! | `subject_group` | none | `string[]` |
//! | `subject` | `"<group>"` | `string[]` |
//! | `interest` | `["<subject>", ...]` | `string[]` |
//! | `course` | `{"interest": [...], "group": "..."}` | `string[]` |
//! | `college` | `"<course>"` | `string[]` |
//! | `exam` | `{"college": "...", "course": "..."}` | `string[]` |
//! | `cutoff` | `{"exam": "...", "college": "...", "course": "..."}` | `string` |
//! | `summary` | full selection object | `string` |
//! | `chat` | `[{"role": "...", "content": "..."}, ...]` | `{content}` |

use axum::{Json, extract::State};
use disha_core::{
  llm::{ChatMessage, TextModel},
  store::CounselStore,
};
use disha_tools as tools;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

/// The request envelope: `{ "tool": "...", "input": ... }`.
#[derive(Debug, Deserialize)]
pub struct ToolRequest {
  pub tool:  String,
  #[serde(default)]
  pub input: Value,
}

#[derive(Debug, Deserialize)]
struct CourseInput {
  #[serde(default)]
  interest: Vec<String>,
  group:    String,
}

#[derive(Debug, Deserialize)]
struct ExamInput {
  college: String,
  course:  String,
}

#[derive(Debug, Deserialize)]
struct CutoffInput {
  exam:    String,
  college: String,
  // Older front-end revisions omit the course.
  #[serde(default)]
  course:  String,
}

fn input<T>(tool: &str, value: Value) -> Result<T, ApiError>
where
  T: serde::de::DeserializeOwned,
{
  serde_json::from_value(value)
    .map_err(|e| ApiError::BadRequest(format!("invalid input for {tool}: {e}")))
}

/// `POST /api/tool`
pub async fn handler<S, M>(
  State(state): State<AppState<S, M>>,
  Json(req): Json<ToolRequest>,
) -> Result<Json<Value>, ApiError>
where
  S: CounselStore + Clone + Send + Sync + 'static,
  M: TextModel + Clone + Send + Sync + 'static,
{
  let store = state.store.as_ref();
  let model = state.model.as_ref();

  let result = match req.tool.as_str() {
    "subject_group" => json!(tools::subject_groups(store, model).await?),
    "subject" => {
      let group: String = input("subject", req.input)?;
      json!(tools::subjects_for_group(store, model, &group).await?)
    }
    "interest" => {
      let subjects: Vec<String> = input("interest", req.input)?;
      json!(tools::interests_for_subjects(store, model, &subjects).await?)
    }
    "course" => {
      let body: CourseInput = input("course", req.input)?;
      json!(tools::courses_for(store, model, &body.interest, &body.group).await?)
    }
    "college" => {
      let course: String = input("college", req.input)?;
      json!(tools::colleges_for_course(store, model, &course).await?)
    }
    "exam" => {
      let body: ExamInput = input("exam", req.input)?;
      json!(tools::exams_for(store, model, &body.college, &body.course).await?)
    }
    "cutoff" => {
      let body: CutoffInput = input("cutoff", req.input)?;
      json!(
        tools::cutoff_for(store, model, &body.exam, &body.college, &body.course)
          .await?
      )
    }
    "summary" => {
      let body: tools::SummaryInput = input("summary", req.input)?;
      json!(tools::career_summary(model, &body).await)
    }
    "chat" => {
      let messages: Vec<ChatMessage> = input("chat", req.input)?;
      json!(tools::chat_reply(model, messages).await)
    }
    other => return Err(ApiError::UnknownTool(other.to_string())),
  };

  Ok(Json(result))
}
