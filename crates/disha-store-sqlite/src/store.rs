//! [`SqliteStore`] — the SQLite implementation of [`CounselStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use disha_core::{
  entity::{College, Course, Cutoff, Exam, Interest, NewCollege, Subject, SubjectGroup},
  name::normalize,
  store::CounselStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Raw rows ────────────────────────────────────────────────────────────────

fn now_str() -> String {
  Utc::now().to_rfc3339()
}

fn parse_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// Row shape shared by `subject_groups` and `exams`.
struct RawNamed {
  id:         i64,
  name:       String,
  created_at: String,
}

impl RawNamed {
  fn into_group(self) -> Result<SubjectGroup> {
    Ok(SubjectGroup {
      id:         self.id,
      name:       self.name,
      created_at: parse_dt(&self.created_at)?,
    })
  }

  fn into_exam(self) -> Result<Exam> {
    Ok(Exam {
      id:         self.id,
      name:       self.name,
      created_at: parse_dt(&self.created_at)?,
    })
  }
}

/// Row shape shared by `subjects` and `courses`.
struct RawGrouped {
  id:         i64,
  name:       String,
  group_id:   Option<i64>,
  category:   Option<String>,
  created_at: String,
}

impl RawGrouped {
  fn into_subject(self) -> Result<Subject> {
    Ok(Subject {
      id:         self.id,
      name:       self.name,
      group_id:   self.group_id,
      category:   self.category,
      created_at: parse_dt(&self.created_at)?,
    })
  }

  fn into_course(self) -> Result<Course> {
    Ok(Course {
      id:         self.id,
      name:       self.name,
      group_id:   self.group_id,
      category:   self.category,
      created_at: parse_dt(&self.created_at)?,
    })
  }
}

struct RawInterest {
  id:         i64,
  name:       String,
  category:   Option<String>,
  created_at: String,
}

impl RawInterest {
  fn into_interest(self) -> Result<Interest> {
    Ok(Interest {
      id:         self.id,
      name:       self.name,
      category:   self.category,
      created_at: parse_dt(&self.created_at)?,
    })
  }
}

struct RawCollege {
  id:             i64,
  name:           String,
  location_state: Option<String>,
  rating:         Option<String>,
  created_at:     String,
}

impl RawCollege {
  fn into_college(self) -> Result<College> {
    Ok(College {
      id:             self.id,
      name:           self.name,
      location_state: self.location_state,
      rating:         self.rating,
      created_at:     parse_dt(&self.created_at)?,
    })
  }
}

struct RawCutoff {
  id:         i64,
  exam_id:    i64,
  college_id: i64,
  course_id:  i64,
  value:      String,
  created_at: String,
}

impl RawCutoff {
  fn into_cutoff(self) -> Result<Cutoff> {
    Ok(Cutoff {
      id:         self.id,
      exam_id:    self.exam_id,
      college_id: self.college_id,
      course_id:  self.course_id,
      value:      self.value,
      created_at: parse_dt(&self.created_at)?,
    })
  }
}

/// Normalize a batch of names, dropping entries that normalize to nothing.
fn normalize_batch(names: Vec<String>) -> Vec<String> {
  names
    .into_iter()
    .map(|n| normalize(&n))
    .filter(|n| !n.is_empty())
    .collect()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A counseling cache backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Each
/// method acquires the connection for the duration of its call and releases
/// it on every path; multi-row writes run inside one transaction that is
/// rolled back wholesale on any error.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Total number of cutoff rows. Exposed for tests asserting the upsert
  /// does not grow the table.
  pub async fn count_cutoffs(&self) -> Result<i64> {
    let n = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM cutoffs", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n)
  }

  /// Total number of subject-interest link rows. Exposed for tests
  /// asserting link idempotence.
  pub async fn count_subject_interest_links(&self) -> Result<i64> {
    let n = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM subject_interests", [], |r| {
          r.get(0)
        })?)
      })
      .await?;
    Ok(n)
  }

  /// Names of interests currently linked to a subject, ordered by name.
  pub async fn interests_of_subject(&self, subject_id: i64) -> Result<Vec<String>> {
    let names = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT i.name FROM interests i
           JOIN subject_interests si ON si.interest_id = i.id
           WHERE si.subject_id = ?1
           ORDER BY i.name ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![subject_id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(names)
  }

  /// Names of colleges linked to a course, ordered by name.
  pub async fn colleges_of_course(&self, course_id: i64) -> Result<Vec<String>> {
    let names = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT c.name FROM colleges c
           JOIN course_colleges cc ON cc.college_id = c.id
           WHERE cc.course_id = ?1
           ORDER BY c.name ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![course_id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(names)
  }
}

// ─── CounselStore impl ───────────────────────────────────────────────────────

impl CounselStore for SqliteStore {
  type Error = Error;

  // ── Subject groups ────────────────────────────────────────────────────────

  async fn list_subject_groups(&self) -> Result<Vec<SubjectGroup>> {
    let raws: Vec<RawNamed> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, created_at FROM subject_groups ORDER BY name ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawNamed {
              id:         row.get(0)?,
              name:       row.get(1)?,
              created_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNamed::into_group).collect()
  }

  async fn insert_subject_groups(&self, names: Vec<String>) -> Result<()> {
    let names = normalize_batch(names);
    let at = now_str();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for name in &names {
          tx.execute(
            "INSERT INTO subject_groups (name, created_at) VALUES (?1, ?2)
             ON CONFLICT (name) DO NOTHING",
            rusqlite::params![name, at],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn find_subject_group(&self, name: &str) -> Result<Option<SubjectGroup>> {
    let name = normalize(name);

    let raw: Option<RawNamed> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, created_at FROM subject_groups WHERE name = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawNamed {
                  id:         row.get(0)?,
                  name:       row.get(1)?,
                  created_at: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawNamed::into_group).transpose()
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn subjects_of_group(&self, group_id: i64) -> Result<Vec<Subject>> {
    let raws: Vec<RawGrouped> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, group_id, category, created_at
           FROM subjects WHERE group_id = ?1 ORDER BY name ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![group_id], |row| {
            Ok(RawGrouped {
              id:         row.get(0)?,
              name:       row.get(1)?,
              group_id:   row.get(2)?,
              category:   row.get(3)?,
              created_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGrouped::into_subject).collect()
  }

  async fn insert_subjects(
    &self,
    group_id: i64,
    category: String,
    names: Vec<String>,
  ) -> Result<()> {
    let names = normalize_batch(names);
    let at = now_str();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for name in &names {
          tx.execute(
            "INSERT INTO subjects (name, group_id, category, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (name) DO NOTHING",
            rusqlite::params![name, group_id, category, at],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn find_subject(&self, name: &str) -> Result<Option<Subject>> {
    let name = normalize(name);

    let raw: Option<RawGrouped> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, group_id, category, created_at
               FROM subjects WHERE name = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawGrouped {
                  id:         row.get(0)?,
                  name:       row.get(1)?,
                  group_id:   row.get(2)?,
                  category:   row.get(3)?,
                  created_at: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawGrouped::into_subject).transpose()
  }

  // ── Interests ─────────────────────────────────────────────────────────────

  async fn insert_interests(
    &self,
    category: Option<String>,
    names: Vec<String>,
    subject_names: Vec<String>,
  ) -> Result<()> {
    let names = normalize_batch(names);
    let subject_names = normalize_batch(subject_names);
    let at = now_str();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Resolve subject ids once; unknown subjects are skipped.
        let mut subject_ids: Vec<i64> = Vec::new();
        for subject in &subject_names {
          let id: Option<i64> = tx
            .query_row(
              "SELECT id FROM subjects WHERE name = ?1",
              rusqlite::params![subject],
              |row| row.get(0),
            )
            .optional()?;
          if let Some(id) = id {
            subject_ids.push(id);
          }
        }

        for name in &names {
          tx.execute(
            "INSERT INTO interests (name, category, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT (name) DO NOTHING",
            rusqlite::params![name, category, at],
          )?;
          let interest_id: i64 = tx.query_row(
            "SELECT id FROM interests WHERE name = ?1",
            rusqlite::params![name],
            |row| row.get(0),
          )?;

          for subject_id in &subject_ids {
            tx.execute(
              "INSERT INTO subject_interests (subject_id, interest_id)
               VALUES (?1, ?2)
               ON CONFLICT DO NOTHING",
              rusqlite::params![subject_id, interest_id],
            )?;
          }
        }

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn find_interest(&self, name: &str) -> Result<Option<Interest>> {
    let name = normalize(name);

    let raw: Option<RawInterest> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, category, created_at FROM interests WHERE name = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawInterest {
                  id:         row.get(0)?,
                  name:       row.get(1)?,
                  category:   row.get(2)?,
                  created_at: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawInterest::into_interest).transpose()
  }

  // ── Courses ───────────────────────────────────────────────────────────────

  async fn courses_of_group(&self, group_id: i64) -> Result<Vec<Course>> {
    let raws: Vec<RawGrouped> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, group_id, category, created_at
           FROM courses WHERE group_id = ?1 ORDER BY name ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![group_id], |row| {
            Ok(RawGrouped {
              id:         row.get(0)?,
              name:       row.get(1)?,
              group_id:   row.get(2)?,
              category:   row.get(3)?,
              created_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGrouped::into_course).collect()
  }

  async fn insert_courses(
    &self,
    group_id: Option<i64>,
    category: String,
    names: Vec<String>,
  ) -> Result<()> {
    let names = normalize_batch(names);
    let at = now_str();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for name in &names {
          tx.execute(
            "INSERT INTO courses (name, group_id, category, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (name) DO NOTHING",
            rusqlite::params![name, group_id, category, at],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn find_course(&self, name: &str) -> Result<Option<Course>> {
    let name = normalize(name);

    let raw: Option<RawGrouped> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, group_id, category, created_at
               FROM courses WHERE name = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawGrouped {
                  id:         row.get(0)?,
                  name:       row.get(1)?,
                  group_id:   row.get(2)?,
                  category:   row.get(3)?,
                  created_at: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawGrouped::into_course).transpose()
  }

  // ── Colleges ──────────────────────────────────────────────────────────────

  async fn insert_colleges(
    &self,
    course_name: String,
    colleges: Vec<NewCollege>,
  ) -> Result<()> {
    let course_name = normalize(&course_name);
    let colleges: Vec<NewCollege> = colleges
      .into_iter()
      .map(|c| NewCollege { name: normalize(&c.name), ..c })
      .filter(|c| !c.name.is_empty())
      .collect();
    let at = now_str();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let course_id: Option<i64> = tx
          .query_row(
            "SELECT id FROM courses WHERE name = ?1",
            rusqlite::params![course_name],
            |row| row.get(0),
          )
          .optional()?;

        for college in &colleges {
          tx.execute(
            "INSERT INTO colleges (name, location_state, rating, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (name) DO NOTHING",
            rusqlite::params![
              college.name,
              college.location_state,
              college.rating,
              at
            ],
          )?;

          if let Some(course_id) = course_id {
            let college_id: i64 = tx.query_row(
              "SELECT id FROM colleges WHERE name = ?1",
              rusqlite::params![college.name],
              |row| row.get(0),
            )?;
            tx.execute(
              "INSERT INTO course_colleges (course_id, college_id)
               VALUES (?1, ?2)
               ON CONFLICT DO NOTHING",
              rusqlite::params![course_id, college_id],
            )?;
          }
        }

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn find_college(&self, name: &str) -> Result<Option<College>> {
    let name = normalize(name);

    let raw: Option<RawCollege> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, location_state, rating, created_at
               FROM colleges WHERE name = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawCollege {
                  id:             row.get(0)?,
                  name:           row.get(1)?,
                  location_state: row.get(2)?,
                  rating:         row.get(3)?,
                  created_at:     row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCollege::into_college).transpose()
  }

  // ── Exams ─────────────────────────────────────────────────────────────────

  async fn exams_of_college(&self, college_id: i64) -> Result<Vec<Exam>> {
    let raws: Vec<RawNamed> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.id, e.name, e.created_at
           FROM exams e
           JOIN college_exams ce ON ce.exam_id = e.id
           WHERE ce.college_id = ?1
           ORDER BY e.name ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![college_id], |row| {
            Ok(RawNamed {
              id:         row.get(0)?,
              name:       row.get(1)?,
              created_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNamed::into_exam).collect()
  }

  async fn insert_exams(&self, college_id: i64, names: Vec<String>) -> Result<()> {
    let names = normalize_batch(names);
    let at = now_str();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for name in &names {
          tx.execute(
            "INSERT INTO exams (name, created_at) VALUES (?1, ?2)
             ON CONFLICT (name) DO NOTHING",
            rusqlite::params![name, at],
          )?;
          let exam_id: i64 = tx.query_row(
            "SELECT id FROM exams WHERE name = ?1",
            rusqlite::params![name],
            |row| row.get(0),
          )?;
          tx.execute(
            "INSERT INTO college_exams (college_id, exam_id) VALUES (?1, ?2)
             ON CONFLICT DO NOTHING",
            rusqlite::params![college_id, exam_id],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn find_exam(&self, name: &str) -> Result<Option<Exam>> {
    let name = normalize(name);

    let raw: Option<RawNamed> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, created_at FROM exams WHERE name = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawNamed {
                  id:         row.get(0)?,
                  name:       row.get(1)?,
                  created_at: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawNamed::into_exam).transpose()
  }

  // ── Cutoffs ───────────────────────────────────────────────────────────────

  async fn upsert_cutoff(
    &self,
    exam_id: i64,
    college_id: i64,
    course_id: i64,
    value: String,
  ) -> Result<()> {
    let at = now_str();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cutoffs (exam_id, college_id, course_id, value, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT (exam_id, college_id, course_id)
           DO UPDATE SET value = excluded.value",
          rusqlite::params![exam_id, college_id, course_id, value, at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_cutoff(
    &self,
    exam_id: i64,
    college_id: i64,
    course_id: i64,
  ) -> Result<Option<Cutoff>> {
    let raw: Option<RawCutoff> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, exam_id, college_id, course_id, value, created_at
               FROM cutoffs
               WHERE exam_id = ?1 AND college_id = ?2 AND course_id = ?3",
              rusqlite::params![exam_id, college_id, course_id],
              |row| {
                Ok(RawCutoff {
                  id:         row.get(0)?,
                  exam_id:    row.get(1)?,
                  college_id: row.get(2)?,
                  course_id:  row.get(3)?,
                  value:      row.get(4)?,
                  created_at: row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCutoff::into_cutoff).transpose()
  }
}
