//! The lookup-generate-cache tools behind `POST /api/tool`.
//!
//! Every tool follows the same contract: check the store for cached rows,
//! on a miss prompt the model for a strictly formatted list, parse the
//! reply, persist it insert-or-ignore inside one transaction, and return
//! the parsed strings. Failures degrade rather than propagate: a model or
//! parse failure yields an empty list (an error string for cutoff and
//! summary), and a failed write transaction discards the generated text.
//! Only store *read* failures bubble up to the dispatcher.
//!
//! Tools are generic over [`CounselStore`] and [`TextModel`]; the process
//! entry point owns both and passes them in.

pub mod chat;
pub mod colleges;
pub mod courses;
pub mod cutoff;
pub mod error;
pub mod exams;
pub mod groups;
pub mod interests;
pub mod prompts;
pub mod subjects;
pub mod summary;

pub use chat::{ChatReply, chat_reply};
pub use colleges::colleges_for_course;
pub use courses::courses_for;
pub use cutoff::cutoff_for;
pub use error::{Error, Result};
pub use exams::exams_for;
pub use groups::subject_groups;
pub use interests::interests_for_subjects;
pub use subjects::subjects_for_group;
pub use summary::{SummaryInput, career_summary};
