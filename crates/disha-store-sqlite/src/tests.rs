//! Integration tests for `SqliteStore` against an in-memory database.

use disha_core::{entity::NewCollege, store::CounselStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn names(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

// ─── Subject groups ──────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_list_groups() {
  let s = store().await;
  s.insert_subject_groups(names(&["Science with Biology", "Commerce with Mathematics"]))
    .await
    .unwrap();

  let groups = s.list_subject_groups().await.unwrap();
  assert_eq!(groups.len(), 2);
  // Ordered by name.
  assert_eq!(groups[0].name, "Commerce with Mathematics");
  assert_eq!(groups[1].name, "Science with Biology");
}

#[tokio::test]
async fn duplicate_group_insert_is_a_noop() {
  let s = store().await;
  s.insert_subject_groups(names(&["Science with Biology"])).await.unwrap();
  s.insert_subject_groups(names(&["Science with Biology"])).await.unwrap();

  assert_eq!(s.list_subject_groups().await.unwrap().len(), 1);
}

#[tokio::test]
async fn names_are_normalized_and_case_insensitive() {
  let s = store().await;
  s.insert_subject_groups(names(&["  Science   with Biology "])).await.unwrap();
  s.insert_subject_groups(names(&["science with biology"])).await.unwrap();

  let groups = s.list_subject_groups().await.unwrap();
  assert_eq!(groups.len(), 1);
  // Display form keeps the first writer's casing, whitespace collapsed.
  assert_eq!(groups[0].name, "Science with Biology");

  let found = s.find_subject_group(" SCIENCE WITH BIOLOGY ").await.unwrap();
  assert!(found.is_some());
}

#[tokio::test]
async fn find_group_missing_returns_none() {
  let s = store().await;
  assert!(s.find_subject_group("Vocational Stream").await.unwrap().is_none());
}

// ─── Subjects ────────────────────────────────────────────────────────────────

async fn seeded_group(s: &SqliteStore, name: &str) -> i64 {
  s.insert_subject_groups(names(&[name])).await.unwrap();
  s.find_subject_group(name).await.unwrap().unwrap().id
}

#[tokio::test]
async fn subjects_link_to_group_and_carry_category() {
  let s = store().await;
  let gid = seeded_group(&s, "Science with Biology").await;

  s.insert_subjects(gid, "Science with Biology".into(), names(&["Physics", "Biology"]))
    .await
    .unwrap();

  let subjects = s.subjects_of_group(gid).await.unwrap();
  assert_eq!(subjects.len(), 2);
  assert!(subjects.iter().all(|su| su.group_id == Some(gid)));
  assert!(
    subjects
      .iter()
      .all(|su| su.category.as_deref() == Some("Science with Biology"))
  );
}

#[tokio::test]
async fn repeated_subject_insert_does_not_duplicate() {
  let s = store().await;
  let gid = seeded_group(&s, "Science with Biology").await;

  s.insert_subjects(gid, "Science with Biology".into(), names(&["Physics"]))
    .await
    .unwrap();
  s.insert_subjects(gid, "Science with Biology".into(), names(&["Physics", "Chemistry"]))
    .await
    .unwrap();

  assert_eq!(s.subjects_of_group(gid).await.unwrap().len(), 2);
}

// ─── Interests ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn interests_link_to_subjects_idempotently() {
  let s = store().await;
  let gid = seeded_group(&s, "Science with Biology").await;
  s.insert_subjects(gid, "Science with Biology".into(), names(&["Physics", "Biology"]))
    .await
    .unwrap();

  s.insert_interests(
    Some("Science with Biology".into()),
    names(&["Medicine", "Research"]),
    names(&["Physics", "Biology"]),
  )
  .await
  .unwrap();

  // 2 interests x 2 subjects.
  assert_eq!(s.count_subject_interest_links().await.unwrap(), 4);

  // Re-running the same write adds nothing.
  s.insert_interests(
    Some("Science with Biology".into()),
    names(&["Medicine", "Research"]),
    names(&["Physics", "Biology"]),
  )
  .await
  .unwrap();
  assert_eq!(s.count_subject_interest_links().await.unwrap(), 4);

  let physics = s.find_subject("Physics").await.unwrap().unwrap();
  assert_eq!(
    s.interests_of_subject(physics.id).await.unwrap(),
    ["Medicine", "Research"]
  );
}

#[tokio::test]
async fn interest_links_skip_unknown_subjects() {
  let s = store().await;
  s.insert_interests(None, names(&["Robotics"]), names(&["Nonexistent Subject"]))
    .await
    .unwrap();

  assert!(s.find_interest("Robotics").await.unwrap().is_some());
  assert_eq!(s.count_subject_interest_links().await.unwrap(), 0);
}

// ─── Courses and colleges ────────────────────────────────────────────────────

#[tokio::test]
async fn courses_cached_per_group() {
  let s = store().await;
  let gid = seeded_group(&s, "Science with Computer Science").await;

  s.insert_courses(Some(gid), "Science with Computer Science".into(), names(&["B.Tech CSE", "BCA"]))
    .await
    .unwrap();

  let courses = s.courses_of_group(gid).await.unwrap();
  assert_eq!(courses.len(), 2);
  assert_eq!(courses[0].name, "B.Tech CSE");
}

#[tokio::test]
async fn colleges_link_to_course_when_it_exists() {
  let s = store().await;
  let gid = seeded_group(&s, "Science with Computer Science").await;
  s.insert_courses(Some(gid), "Science with Computer Science".into(), names(&["B.Tech CSE"]))
    .await
    .unwrap();

  s.insert_colleges(
    "B.Tech CSE".into(),
    vec![
      NewCollege {
        name:           "NIT Trichy".into(),
        location_state: Some("Tamil Nadu".into()),
        rating:         Some("NIRF #9".into()),
      },
      NewCollege {
        name:           "IIT Madras".into(),
        location_state: Some("India (All India)".into()),
        rating:         None,
      },
    ],
  )
  .await
  .unwrap();

  let course = s.find_course("B.Tech CSE").await.unwrap().unwrap();
  assert_eq!(
    s.colleges_of_course(course.id).await.unwrap(),
    ["IIT Madras", "NIT Trichy"]
  );

  let nit = s.find_college("nit trichy").await.unwrap().unwrap();
  assert_eq!(nit.location_state.as_deref(), Some("Tamil Nadu"));
  assert_eq!(nit.rating.as_deref(), Some("NIRF #9"));
}

#[tokio::test]
async fn colleges_persist_even_without_a_cached_course() {
  let s = store().await;
  s.insert_colleges(
    "Unknown Course".into(),
    vec![NewCollege {
      name:           "Loyola College".into(),
      location_state: None,
      rating:         None,
    }],
  )
  .await
  .unwrap();

  assert!(s.find_college("Loyola College").await.unwrap().is_some());
}

// ─── Exams ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn exams_cached_per_college() {
  let s = store().await;
  s.insert_colleges(
    "B.Tech CSE".into(),
    vec![NewCollege {
      name:           "NIT Trichy".into(),
      location_state: None,
      rating:         None,
    }],
  )
  .await
  .unwrap();
  let college = s.find_college("NIT Trichy").await.unwrap().unwrap();

  s.insert_exams(college.id, names(&["JEE Main", "JEE Advanced"])).await.unwrap();
  s.insert_exams(college.id, names(&["JEE Main"])).await.unwrap();

  let exams = s.exams_of_college(college.id).await.unwrap();
  assert_eq!(exams.len(), 2);
  assert_eq!(exams[0].name, "JEE Advanced");
}

// ─── Cutoffs ─────────────────────────────────────────────────────────────────

async fn seeded_triple(s: &SqliteStore) -> (i64, i64, i64) {
  let gid = seeded_group(s, "Science with Computer Science").await;
  s.insert_courses(Some(gid), "Science with Computer Science".into(), names(&["B.Tech CSE"]))
    .await
    .unwrap();
  s.insert_colleges(
    "B.Tech CSE".into(),
    vec![NewCollege {
      name:           "NIT Trichy".into(),
      location_state: None,
      rating:         None,
    }],
  )
  .await
  .unwrap();
  let college = s.find_college("NIT Trichy").await.unwrap().unwrap();
  s.insert_exams(college.id, names(&["JEE Main"])).await.unwrap();

  let exam = s.find_exam("JEE Main").await.unwrap().unwrap();
  let course = s.find_course("B.Tech CSE").await.unwrap().unwrap();
  (exam.id, college.id, course.id)
}

#[tokio::test]
async fn cutoff_upsert_overwrites_instead_of_duplicating() {
  let s = store().await;
  let (exam_id, college_id, course_id) = seeded_triple(&s).await;

  s.upsert_cutoff(exam_id, college_id, course_id, "98.5 percentile".into())
    .await
    .unwrap();
  let first = s.get_cutoff(exam_id, college_id, course_id).await.unwrap().unwrap();
  assert_eq!(first.value, "98.5 percentile");

  s.upsert_cutoff(exam_id, college_id, course_id, "97.2 percentile".into())
    .await
    .unwrap();
  let second = s.get_cutoff(exam_id, college_id, course_id).await.unwrap().unwrap();
  assert_eq!(second.value, "97.2 percentile");

  assert_eq!(s.count_cutoffs().await.unwrap(), 1);
}

#[tokio::test]
async fn get_cutoff_missing_returns_none() {
  let s = store().await;
  assert!(s.get_cutoff(1, 2, 3).await.unwrap().is_none());
}
