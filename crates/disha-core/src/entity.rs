//! Row types for the counseling cache.
//!
//! Every entity is keyed by a normalized natural-language name (see
//! [`crate::name::normalize`]); the integer ids exist only so junction
//! tables stay compact. Rows are created lazily by the lookup tools and
//! never deleted — the store is a cache of LLM output, not a system of
//! record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A 12th-standard academic stream, e.g. "Science with Biology".
/// Root of the selection tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectGroup {
  pub id:         i64,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}

/// A subject taught under a stream. `category` mirrors the group name at
/// generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
  pub id:         i64,
  pub name:       String,
  pub group_id:   Option<i64>,
  pub category:   Option<String>,
  pub created_at: DateTime<Utc>,
}

/// A career interest derived from a set of subjects. `category` is
/// inherited from the first subject that generated it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interest {
  pub id:         i64,
  pub name:       String,
  pub category:   Option<String>,
  pub created_at: DateTime<Utc>,
}

/// An undergraduate degree program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
  pub id:         i64,
  pub name:       String,
  pub group_id:   Option<i64>,
  pub category:   Option<String>,
  pub created_at: DateTime<Utc>,
}

/// A college, with the free-text rating the model supplied and the section
/// it was listed under ("India (All India)" or "Tamil Nadu").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
  pub id:             i64,
  pub name:           String,
  pub location_state: Option<String>,
  pub rating:         Option<String>,
  pub created_at:     DateTime<Utc>,
}

/// Fields of a college parsed out of one model reply line, before it has
/// been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollege {
  pub name:           String,
  pub location_state: Option<String>,
  pub rating:         Option<String>,
}

/// An entrance exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
  pub id:         i64,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}

/// A free-text cutoff value for the (exam, college, course) triple.
/// The only entity that is ever overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cutoff {
  pub id:         i64,
  pub exam_id:    i64,
  pub college_id: i64,
  pub course_id:  i64,
  pub value:      String,
  pub created_at: DateTime<Utc>,
}
