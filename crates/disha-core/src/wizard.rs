//! The seven-step counseling wizard as an explicit finite-state machine.
//!
//! The machine performs no I/O. Each forward transition returns a [`Fetch`]
//! describing the tool call the front-end must make; the reply comes back
//! via [`Wizard::set_options`] (or [`Wizard::finish`] for the terminal
//! step). "Previous" restores the exact prior state from an append-only
//! stack of full snapshots; "start over" clears everything.
//!
//! The snapshot is pushed optimistically when a transition begins. A failed
//! fetch is surfaced by the front-end and does not pop the stack, matching
//! the original behavior.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::name::normalize;

// ─── Steps and effects ───────────────────────────────────────────────────────

/// Position in the wizard. Linear; `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
  Group,
  Subjects,
  Interests,
  Course,
  College,
  Exam,
  Done,
}

impl Step {
  pub fn index(self) -> usize {
    match self {
      Step::Group => 0,
      Step::Subjects => 1,
      Step::Interests => 2,
      Step::Course => 3,
      Step::College => 4,
      Step::Exam => 5,
      Step::Done => 6,
    }
  }

  /// Steps 1 and 2 are multi-select.
  pub fn is_multi(self) -> bool {
    matches!(self, Step::Subjects | Step::Interests)
  }
}

/// A tool call the front-end must perform to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
  SubjectGroups,
  Subjects { group: String },
  Interests { subjects: Vec<String> },
  Courses { interests: Vec<String>, group: String },
  Colleges { course: String },
  Exams { college: String, course: String },
  /// Terminal step: fetch the cutoff, then the summary, then call
  /// [`Wizard::finish`].
  Outcome { exam: String, college: String, course: String },
}

// ─── Selection state ─────────────────────────────────────────────────────────

/// The running selection, one field per wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
  pub group:     String,
  pub subjects:  Vec<String>,
  pub interests: Vec<String>,
  pub course:    String,
  pub college:   String,
  pub exam:      String,
  pub cutoff:    String,
  pub summary:   String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
  #[error("a selection is required before continuing")]
  EmptySelection,

  #[error("check at least one option before continuing")]
  NothingChecked,

  #[error("option index {0} is out of range")]
  OptionOutOfRange(usize),

  #[error("the current step is not a {expected} step")]
  WrongStep { expected: &'static str },

  #[error("no earlier step to return to")]
  NoHistory,

  #[error("the wizard has already finished")]
  Finished,
}

// ─── The machine ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Snapshot {
  step:      Step,
  options:   Vec<String>,
  checked:   Vec<bool>,
  selection: Selection,
}

/// The wizard state machine.
#[derive(Debug, Clone)]
pub struct Wizard {
  step:      Step,
  options:   Vec<String>,
  checked:   Vec<bool>,
  selection: Selection,
  history:   Vec<Snapshot>,
}

impl Default for Wizard {
  fn default() -> Self {
    Self::new()
  }
}

impl Wizard {
  pub fn new() -> Self {
    Wizard {
      step:      Step::Group,
      options:   Vec::new(),
      checked:   Vec::new(),
      selection: Selection::default(),
      history:   Vec::new(),
    }
  }

  /// The fetch that populates the first step's options.
  pub fn initial_fetch(&self) -> Fetch {
    Fetch::SubjectGroups
  }

  pub fn step(&self) -> Step {
    self.step
  }

  pub fn options(&self) -> &[String] {
    &self.options
  }

  pub fn checked(&self) -> &[bool] {
    &self.checked
  }

  pub fn selection(&self) -> &Selection {
    &self.selection
  }

  /// Install the options returned by the pending fetch. Clears the
  /// multi-select map.
  pub fn set_options(&mut self, options: Vec<String>) {
    self.checked = vec![false; options.len()];
    self.options = options;
  }

  /// Flip the checkbox for one option. Only valid on multi-select steps.
  pub fn toggle(&mut self, index: usize) -> Result<(), WizardError> {
    if !self.step.is_multi() {
      return Err(WizardError::WrongStep { expected: "multi-select" });
    }
    match self.checked.get_mut(index) {
      Some(flag) => {
        *flag = !*flag;
        Ok(())
      }
      None => Err(WizardError::OptionOutOfRange(index)),
    }
  }

  fn push_snapshot(&mut self) {
    self.history.push(Snapshot {
      step:      self.step,
      options:   self.options.clone(),
      checked:   self.checked.clone(),
      selection: self.selection.clone(),
    });
  }

  /// Advance from a single-choice step with the chosen option.
  pub fn choose(&mut self, value: &str) -> Result<Fetch, WizardError> {
    let value = normalize(value);
    if value.is_empty() {
      return Err(WizardError::EmptySelection);
    }

    let fetch = match self.step {
      Step::Group => {
        self.push_snapshot();
        self.selection.group = value.clone();
        self.step = Step::Subjects;
        Fetch::Subjects { group: value }
      }
      Step::Course => {
        self.push_snapshot();
        self.selection.course = value.clone();
        self.step = Step::College;
        Fetch::Colleges { course: value }
      }
      Step::College => {
        self.push_snapshot();
        self.selection.college = value.clone();
        self.step = Step::Exam;
        Fetch::Exams {
          college: value,
          course:  self.selection.course.clone(),
        }
      }
      Step::Exam => {
        self.push_snapshot();
        self.selection.exam = value.clone();
        Fetch::Outcome {
          exam:    value,
          college: self.selection.college.clone(),
          course:  self.selection.course.clone(),
        }
      }
      Step::Done => return Err(WizardError::Finished),
      _ => return Err(WizardError::WrongStep { expected: "single-choice" }),
    };

    self.options = Vec::new();
    self.checked = Vec::new();
    Ok(fetch)
  }

  /// Advance from a multi-select step with the checked options plus, at the
  /// subjects step, an optional free-text extra entry.
  pub fn advance_multi(&mut self, extra: Option<&str>) -> Result<Fetch, WizardError> {
    if !self.step.is_multi() {
      return Err(WizardError::WrongStep { expected: "multi-select" });
    }

    let mut picked: Vec<String> = self
      .options
      .iter()
      .zip(&self.checked)
      .filter(|&(_, &on)| on)
      .map(|(opt, _)| opt.clone())
      .collect();

    if self.step == Step::Subjects
      && let Some(extra) = extra.map(normalize).filter(|e| !e.is_empty())
      && !picked.iter().any(|p| p.eq_ignore_ascii_case(&extra))
    {
      picked.push(extra);
    }

    if picked.is_empty() {
      return Err(WizardError::NothingChecked);
    }

    self.push_snapshot();
    let fetch = match self.step {
      Step::Subjects => {
        self.selection.subjects = picked.clone();
        self.step = Step::Interests;
        Fetch::Interests { subjects: picked }
      }
      Step::Interests => {
        self.selection.interests = picked.clone();
        self.step = Step::Course;
        Fetch::Courses {
          interests: picked,
          group:     self.selection.group.clone(),
        }
      }
      _ => unreachable!("is_multi checked above"),
    };

    self.options = Vec::new();
    self.checked = Vec::new();
    Ok(fetch)
  }

  /// Record the terminal results and move to `Done`.
  pub fn finish(&mut self, cutoff: String, summary: String) -> Result<(), WizardError> {
    if self.step != Step::Exam {
      return Err(WizardError::WrongStep { expected: "exam" });
    }
    self.selection.cutoff = cutoff;
    self.selection.summary = summary;
    self.step = Step::Done;
    Ok(())
  }

  /// Restore the exact prior snapshot: step, options, checkbox map, and
  /// every selection field.
  pub fn previous(&mut self) -> Result<(), WizardError> {
    let snap = self.history.pop().ok_or(WizardError::NoHistory)?;
    self.step = snap.step;
    self.options = snap.options;
    self.checked = snap.checked;
    self.selection = snap.selection;
    Ok(())
  }

  /// Reset to step 0 with an empty history. Returns the fetch that reloads
  /// the group list.
  pub fn start_over(&mut self) -> Fetch {
    *self = Wizard::new();
    Fetch::SubjectGroups
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn groups() -> Vec<String> {
    vec!["Science with Biology".into(), "Commerce with Mathematics".into()]
  }

  /// Drive the machine to the interests step with a fixed selection.
  fn wizard_at_interests() -> Wizard {
    let mut w = Wizard::new();
    w.set_options(groups());
    w.choose("Science with Biology").unwrap();
    w.set_options(vec!["Physics".into(), "Chemistry".into(), "Biology".into()]);
    w.toggle(0).unwrap();
    w.toggle(2).unwrap();
    w.advance_multi(None).unwrap();
    w.set_options(vec!["Medicine".into(), "Research".into()]);
    w
  }

  #[test]
  fn full_walkthrough() {
    let mut w = Wizard::new();
    assert_eq!(w.initial_fetch(), Fetch::SubjectGroups);
    w.set_options(groups());

    let fetch = w.choose("Science with Biology").unwrap();
    assert_eq!(fetch, Fetch::Subjects { group: "Science with Biology".into() });
    assert_eq!(w.step(), Step::Subjects);

    w.set_options(vec!["Physics".into(), "Chemistry".into()]);
    w.toggle(0).unwrap();
    w.toggle(1).unwrap();
    let fetch = w.advance_multi(None).unwrap();
    assert_eq!(
      fetch,
      Fetch::Interests { subjects: vec!["Physics".into(), "Chemistry".into()] }
    );

    w.set_options(vec!["Medicine".into(), "Research".into()]);
    w.toggle(0).unwrap();
    let fetch = w.advance_multi(None).unwrap();
    assert_eq!(
      fetch,
      Fetch::Courses {
        interests: vec!["Medicine".into()],
        group:     "Science with Biology".into(),
      }
    );

    w.set_options(vec!["MBBS".into()]);
    assert_eq!(w.choose("MBBS").unwrap(), Fetch::Colleges { course: "MBBS".into() });

    w.set_options(vec!["CMC Vellore".into()]);
    assert_eq!(
      w.choose("CMC Vellore").unwrap(),
      Fetch::Exams { college: "CMC Vellore".into(), course: "MBBS".into() }
    );

    w.set_options(vec!["NEET UG".into()]);
    let fetch = w.choose("NEET UG").unwrap();
    assert_eq!(
      fetch,
      Fetch::Outcome {
        exam:    "NEET UG".into(),
        college: "CMC Vellore".into(),
        course:  "MBBS".into(),
      }
    );

    w.finish("600+ in NEET".into(), "A medical career path.".into()).unwrap();
    assert_eq!(w.step(), Step::Done);
    assert_eq!(w.selection().cutoff, "600+ in NEET");
  }

  #[test]
  fn choose_rejects_empty_value() {
    let mut w = Wizard::new();
    w.set_options(groups());
    assert_eq!(w.choose("   "), Err(WizardError::EmptySelection));
    assert_eq!(w.step(), Step::Group);
  }

  #[test]
  fn multi_step_rejects_nothing_checked() {
    let mut w = Wizard::new();
    w.set_options(groups());
    w.choose("Science with Biology").unwrap();
    w.set_options(vec!["Physics".into()]);
    assert_eq!(w.advance_multi(None), Err(WizardError::NothingChecked));
    assert_eq!(w.advance_multi(Some("  ")), Err(WizardError::NothingChecked));
  }

  #[test]
  fn advance_multi_picks_only_checked_options() {
    let mut w = Wizard::new();
    w.set_options(groups());
    w.choose("Science with Biology").unwrap();
    w.set_options(vec!["Physics".into(), "Chemistry".into(), "Biology".into()]);
    w.toggle(1).unwrap();
    let fetch = w.advance_multi(None).unwrap();
    assert_eq!(fetch, Fetch::Interests { subjects: vec!["Chemistry".into()] });
  }

  #[test]
  fn free_text_alone_satisfies_subjects_step() {
    let mut w = Wizard::new();
    w.set_options(groups());
    w.choose("Science with Biology").unwrap();
    w.set_options(vec!["Physics".into()]);
    let fetch = w.advance_multi(Some(" Statistics ")).unwrap();
    assert_eq!(fetch, Fetch::Interests { subjects: vec!["Statistics".into()] });
  }

  #[test]
  fn free_text_duplicate_of_checked_option_is_ignored() {
    let mut w = Wizard::new();
    w.set_options(groups());
    w.choose("Science with Biology").unwrap();
    w.set_options(vec!["Physics".into()]);
    w.toggle(0).unwrap();
    let fetch = w.advance_multi(Some("physics")).unwrap();
    assert_eq!(fetch, Fetch::Interests { subjects: vec!["Physics".into()] });
  }

  #[test]
  fn toggle_outside_multi_step_errors() {
    let mut w = Wizard::new();
    w.set_options(groups());
    assert_eq!(
      w.toggle(0),
      Err(WizardError::WrongStep { expected: "multi-select" })
    );
  }

  #[test]
  fn toggle_out_of_range_errors() {
    let mut w = Wizard::new();
    w.set_options(groups());
    w.choose("Science with Biology").unwrap();
    w.set_options(vec!["Physics".into()]);
    assert_eq!(w.toggle(5), Err(WizardError::OptionOutOfRange(5)));
  }

  #[test]
  fn previous_restores_exact_prior_state() {
    let mut w = wizard_at_interests();
    let before_options = vec!["Medicine".to_string(), "Research".to_string()];
    assert_eq!(w.options(), &before_options[..]);

    w.toggle(1).unwrap();
    w.advance_multi(None).unwrap();
    assert_eq!(w.step(), Step::Course);

    // Back to the interests step, including the checkbox map as it was at
    // the moment of the transition.
    w.previous().unwrap();
    assert_eq!(w.step(), Step::Interests);
    assert_eq!(w.options(), &before_options[..]);
    assert_eq!(w.checked(), &[false, true]);
    assert!(w.selection().interests.is_empty());

    // One more step back: the subjects step with its own checkbox map.
    w.previous().unwrap();
    assert_eq!(w.step(), Step::Subjects);
    assert_eq!(w.checked(), &[true, false, true]);
    assert_eq!(w.selection().subjects, Vec::<String>::new());

    w.previous().unwrap();
    assert_eq!(w.step(), Step::Group);
    assert!(w.selection().group.is_empty());

    assert_eq!(w.previous(), Err(WizardError::NoHistory));
  }

  #[test]
  fn previous_after_finish_returns_to_exam_step() {
    let mut w = Wizard::new();
    w.set_options(groups());
    w.choose("Science with Biology").unwrap();
    w.set_options(vec!["Physics".into()]);
    w.toggle(0).unwrap();
    w.advance_multi(None).unwrap();
    w.set_options(vec!["Medicine".into()]);
    w.toggle(0).unwrap();
    w.advance_multi(None).unwrap();
    w.set_options(vec!["MBBS".into()]);
    w.choose("MBBS").unwrap();
    w.set_options(vec!["CMC Vellore".into()]);
    w.choose("CMC Vellore").unwrap();
    w.set_options(vec!["NEET UG".into(), "JIPMER".into()]);
    w.choose("NEET UG").unwrap();
    w.finish("600+".into(), "summary".into()).unwrap();

    w.previous().unwrap();
    assert_eq!(w.step(), Step::Exam);
    assert_eq!(w.options(), &["NEET UG".to_string(), "JIPMER".to_string()][..]);
    assert!(w.selection().exam.is_empty());
    assert!(w.selection().cutoff.is_empty());
  }

  #[test]
  fn start_over_clears_history_and_selection() {
    let mut w = wizard_at_interests();
    assert_eq!(w.start_over(), Fetch::SubjectGroups);
    assert_eq!(w.step(), Step::Group);
    assert_eq!(w.selection(), &Selection::default());
    assert!(w.options().is_empty());
    assert_eq!(w.previous(), Err(WizardError::NoHistory));
  }

  #[test]
  fn choose_after_done_errors() {
    let mut w = Wizard::new();
    w.set_options(groups());
    w.choose("Science with Biology").unwrap();
    w.set_options(vec!["Physics".into()]);
    w.toggle(0).unwrap();
    w.advance_multi(None).unwrap();
    w.set_options(vec!["Medicine".into()]);
    w.toggle(0).unwrap();
    w.advance_multi(None).unwrap();
    w.set_options(vec!["MBBS".into()]);
    w.choose("MBBS").unwrap();
    w.set_options(vec!["CMC".into()]);
    w.choose("CMC").unwrap();
    w.set_options(vec!["NEET".into()]);
    w.choose("NEET").unwrap();
    w.finish("c".into(), "s".into()).unwrap();
    assert_eq!(w.choose("anything"), Err(WizardError::Finished));
  }
}
