//! Prompt builders for the lookup tools.
//!
//! Each prompt pins the reply to a strict list format (newline, numbered,
//! or bulleted) and forbids conversational filler, because the parser on
//! the other side is a plain line splitter.

use crate::summary::SummaryInput;

pub fn subject_groups() -> String {
  "List the 6 most common 12th standard academic streams/groups in the \
   Indian curriculum, including their standard variations.\n\
   Format: Newline-separated, no numbering, no introductory/concluding text.\n\
   \n\
   Expected examples (strictly these types):\n\
   Science with Biology\n\
   Science with Computer Science\n\
   Commerce with Mathematics\n\
   Commerce without Mathematics\n\
   Humanities / Arts\n\
   Vocational Stream\n"
    .to_string()
}

pub fn subjects(group: &str) -> String {
  format!(
    "List the main subjects typically studied in the \"{group}\" stream in \
     Indian 12th standard education.\n\
     Provide only the subjects as a numbered list, one per line, without \
     any additional text."
  )
}

pub fn interests(subjects: &[String]) -> String {
  format!(
    "Given the 12th standard subjects: {}, generate an extensive list of \
     highly relevant career-related interests.\n\
     Provide the interests as a bulleted list, one interest per line, \
     prefixed with a hyphen (e.g., - Software Development). Do not include \
     any introductory or concluding remarks.",
    subjects.join(", ")
  )
}

pub fn courses(interests: &[String], group: &str) -> String {
  format!(
    "You are an AI career counselor specializing in Indian higher education.\n\
     Based on a student's interests: {} and academic background: \"{group}\",\n\
     list only officially recognized and commonly offered Undergraduate (UG) \
     degree programs in India that directly and strongly align with these \
     inputs.\n\
     \n\
     - Include UG programs such as B.Sc, B.Tech, B.Com, B.A, B.Ed, BBA, BCA, \
     MBBS, B.Arch, etc.\n\
     - Focus strictly on programs where the listed interests and academic \
     group are a clear and direct foundation.\n\
     - Do NOT invent programs or list those not genuinely available as UG \
     degrees in India.\n\
     - Format as a numbered list (e.g., 1. B.Sc in Physics).\n\
     - Provide only the degree names, no explanations or descriptions.",
    interests.join(", ")
  )
}

pub fn colleges(course: &str) -> String {
  format!(
    "You are an AI career assistant specializing in Indian higher education.\n\
     List reputable and well-established colleges in India that definitively \
     offer the undergraduate course \"{course}\".\n\
     Focus strictly on colleges known for genuinely offering this specific \
     UG program.\n\
     \n\
     For each college, include:\n\
     - College Name\n\
     - Its approximate India ranking or rating (e.g., NIRF ranking if \
     available, or a general reputational term like \"Highly Reputed\", \
     \"Well-regarded\"). Do NOT invent specific numerical rankings or \
     fabricate college names.\n\
     \n\
     Group colleges under \"India (All India)\" and \"Tamil Nadu\".\n\
     \n\
     Format:\n\
     \n\
     India (All India):\n\
     1. College Name \u{2013} Rating/Ranking\n\
     2. College Name \u{2013} Rating/Ranking\n\
     \n\
     Tamil Nadu:\n\
     1. College Name \u{2013} Rating/Ranking\n\
     2. College Name \u{2013} Rating/Ranking\n\
     \n\
     Return only this structured list. No other text, no conversational \
     filler."
  )
}

pub fn exams(college: &str, course: &str) -> String {
  format!(
    "What are 3-5 entrance exams or cutoffs required for admission to \
     \"{college}\" for the course \"{course}\"? Format each as a numbered \
     list item."
  )
}

pub fn cutoff(exam: &str, college: &str, course: &str) -> String {
  format!(
    "You are an expert on Indian college admissions cutoffs.\n\
     What is the typical cutoff or percentage required in the \"{exam}\" \
     exam for admission into \"{college}\" for the undergraduate course \
     \"{course}\" in India?\n\
     Provide a clear, concise answer, focusing ONLY on the cutoff \
     value/range or specific criteria.\n\
     Do NOT include any introductory phrases like \"The cutoff is...\" or \
     conversational filler.\n\
     If precise data is unavailable, provide a general range or relevant \
     qualitative information, but keep it concise."
  )
}

pub fn summary(input: &SummaryInput) -> String {
  format!(
    "Summarize the career path for a student in group \"{}\" who studied \
     {}, with interests in {}, pursuing \"{}\" at \"{}\" via the \"{}\" \
     exam (typical cutoff: {}). Provide a clear, concise paragraph.",
    input.group,
    input.subjects.join(", "),
    input.interest.join(", "),
    input.course,
    input.college,
    input.exam,
    if input.cutoff.is_empty() { "unknown" } else { &input.cutoff },
  )
}
