//! The `CounselStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `disha-store-sqlite`).
//! Higher layers (`disha-tools`, `disha-api`) depend on this abstraction,
//! not on any concrete backend.
//!
//! All insert methods are insert-or-ignore on the normalized name and wrap
//! their writes (rows plus junction links) in a single transaction that is
//! rolled back wholesale on any error. Only [`CounselStore::upsert_cutoff`]
//! ever overwrites an existing row.

use std::future::Future;

use crate::entity::{
  College, Course, Cutoff, Exam, Interest, NewCollege, Subject, SubjectGroup,
};

/// Abstraction over the counseling cache backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`).
pub trait CounselStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Subject groups ────────────────────────────────────────────────────

  /// All cached streams, ordered by name.
  fn list_subject_groups(
    &self,
  ) -> impl Future<Output = Result<Vec<SubjectGroup>, Self::Error>> + Send + '_;

  /// Insert-or-ignore a batch of stream names.
  fn insert_subject_groups(
    &self,
    names: Vec<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn find_subject_group<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<SubjectGroup>, Self::Error>> + Send + 'a;

  // ── Subjects ──────────────────────────────────────────────────────────

  fn subjects_of_group(
    &self,
    group_id: i64,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Insert-or-ignore subjects under a group; `category` mirrors the group
  /// name at generation time.
  fn insert_subjects(
    &self,
    group_id: i64,
    category: String,
    names: Vec<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn find_subject<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Subject>, Self::Error>> + Send + 'a;

  // ── Interests ─────────────────────────────────────────────────────────

  /// Insert-or-ignore interests and link each to every named subject.
  /// Subjects not present in the store are skipped, not an error.
  fn insert_interests(
    &self,
    category: Option<String>,
    names: Vec<String>,
    subject_names: Vec<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn find_interest<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Interest>, Self::Error>> + Send + 'a;

  // ── Courses ───────────────────────────────────────────────────────────

  fn courses_of_group(
    &self,
    group_id: i64,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + '_;

  fn insert_courses(
    &self,
    group_id: Option<i64>,
    category: String,
    names: Vec<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn find_course<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Course>, Self::Error>> + Send + 'a;

  // ── Colleges ──────────────────────────────────────────────────────────

  /// Insert-or-ignore colleges and, when `course_name` resolves to a cached
  /// course, link each college to it.
  fn insert_colleges(
    &self,
    course_name: String,
    colleges: Vec<NewCollege>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn find_college<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<College>, Self::Error>> + Send + 'a;

  // ── Exams ─────────────────────────────────────────────────────────────

  /// Exams linked to a college, ordered by name.
  fn exams_of_college(
    &self,
    college_id: i64,
  ) -> impl Future<Output = Result<Vec<Exam>, Self::Error>> + Send + '_;

  fn insert_exams(
    &self,
    college_id: i64,
    names: Vec<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn find_exam<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Exam>, Self::Error>> + Send + 'a;

  // ── Cutoffs ───────────────────────────────────────────────────────────

  /// Insert a cutoff for the (exam, college, course) triple, overwriting
  /// `value` if the triple already has a row.
  fn upsert_cutoff(
    &self,
    exam_id: i64,
    college_id: i64,
    course_id: i64,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_cutoff(
    &self,
    exam_id: i64,
    college_id: i64,
    course_id: i64,
  ) -> impl Future<Output = Result<Option<Cutoff>, Self::Error>> + Send + '_;
}
