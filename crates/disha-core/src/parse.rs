//! Parsing of model replies into lists of names.
//!
//! The list format the prompts ask for is an unenforced contract, so this
//! module is a boundary adapter: individual malformed lines are silently
//! dropped, but a reply that yields no items at all is a [`ParseError`],
//! letting callers distinguish "no data" from "malformed upstream
//! response".

use thiserror::Error;

use crate::{entity::NewCollege, name::normalize};

#[derive(Debug, Error)]
pub enum ParseError {
  #[error("model reply was empty")]
  EmptyReply,

  /// The reply had text but no line matched the requested list format.
  #[error("no {expected} list items in model reply")]
  NoItems { expected: &'static str },
}

/// The list format a prompt asked the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
  /// `1. Item` (also accepts `1) Item`).
  Numbered,
  /// `- Item` (also accepts `*` and `•` markers).
  Bulleted,
  /// One item per non-empty line, no marker.
  Plain,
}

impl ListStyle {
  fn expected(self) -> &'static str {
    match self {
      ListStyle::Numbered => "numbered",
      ListStyle::Bulleted => "bulleted",
      ListStyle::Plain => "plain",
    }
  }

  /// Strip this style's marker from a trimmed line. `None` if the line
  /// does not carry the marker.
  fn strip_marker(self, line: &str) -> Option<&str> {
    match self {
      ListStyle::Plain => Some(line),
      ListStyle::Bulleted => ["- ", "* ", "\u{2022} "]
        .iter()
        .find_map(|m| line.strip_prefix(m)),
      ListStyle::Numbered => {
        let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
          return None;
        }
        let rest = &line[digits..];
        rest
          .strip_prefix('.')
          .or_else(|| rest.strip_prefix(')'))
          .map(str::trim_start)
      }
    }
  }
}

/// Parse a model reply into a deduplicated list of normalized names.
///
/// Lines that do not match `style` are dropped. Duplicates (case
/// insensitive) keep their first occurrence.
pub fn parse_list(text: &str, style: ListStyle) -> Result<Vec<String>, ParseError> {
  if text.trim().is_empty() {
    return Err(ParseError::EmptyReply);
  }

  let mut seen: Vec<String> = Vec::new();
  let mut items: Vec<String> = Vec::new();

  for line in text.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    let Some(item) = style.strip_marker(line) else {
      continue;
    };
    let item = normalize(item);
    if item.is_empty() {
      continue;
    }
    let key = item.to_lowercase();
    if seen.contains(&key) {
      continue;
    }
    seen.push(key);
    items.push(item);
  }

  if items.is_empty() {
    return Err(ParseError::NoItems { expected: style.expected() });
  }
  Ok(items)
}

/// Parse the structured college reply.
///
/// Expected shape:
///
/// ```text
/// India (All India):
/// 1. College Name – Rating
/// ...
/// Tamil Nadu:
/// 1. College Name – Rating
/// ```
///
/// A line ending in `:` opens a section whose header becomes the
/// `location_state` of the items under it. The rating half is optional.
pub fn parse_college_list(text: &str) -> Result<Vec<NewCollege>, ParseError> {
  if text.trim().is_empty() {
    return Err(ParseError::EmptyReply);
  }

  let mut section: Option<String> = None;
  let mut colleges: Vec<NewCollege> = Vec::new();

  for line in text.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    if let Some(header) = line.strip_suffix(':') {
      section = Some(normalize(header));
      continue;
    }
    let Some(item) = ListStyle::Numbered.strip_marker(line) else {
      continue;
    };

    // "Name – Rating"; en dash preferred, a spaced hyphen also accepted.
    let (name, rating) = match item.split_once('\u{2013}') {
      Some((n, r)) => (n, Some(r)),
      None => match item.split_once(" - ") {
        Some((n, r)) => (n, Some(r)),
        None => (item, None),
      },
    };

    let name = normalize(name);
    if name.is_empty() {
      continue;
    }
    if colleges.iter().any(|c| c.name.eq_ignore_ascii_case(&name)) {
      continue;
    }
    colleges.push(NewCollege {
      name,
      location_state: section.clone(),
      rating: rating.map(normalize).filter(|r| !r.is_empty()),
    });
  }

  if colleges.is_empty() {
    return Err(ParseError::NoItems { expected: "college" });
  }
  Ok(colleges)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numbered_list() {
    let items = parse_list("1. Physics\n2. Chemistry", ListStyle::Numbered).unwrap();
    assert_eq!(items, ["Physics", "Chemistry"]);
  }

  #[test]
  fn numbered_accepts_paren_marker() {
    let items = parse_list("1) Botany\n2) Zoology", ListStyle::Numbered).unwrap();
    assert_eq!(items, ["Botany", "Zoology"]);
  }

  #[test]
  fn bulleted_list_with_mixed_markers() {
    let text = "- Software Development\n* Data Science\n\u{2022} Robotics";
    let items = parse_list(text, ListStyle::Bulleted).unwrap();
    assert_eq!(items, ["Software Development", "Data Science", "Robotics"]);
  }

  #[test]
  fn plain_list_splits_on_lines() {
    let text = "Science with Biology\n\nCommerce with Mathematics\n";
    let items = parse_list(text, ListStyle::Plain).unwrap();
    assert_eq!(items, ["Science with Biology", "Commerce with Mathematics"]);
  }

  #[test]
  fn malformed_lines_are_dropped_not_fatal() {
    let text = "Here are the subjects:\n1. Physics\nsome prose\n2. Chemistry";
    let items = parse_list(text, ListStyle::Numbered).unwrap();
    assert_eq!(items, ["Physics", "Chemistry"]);
  }

  #[test]
  fn duplicates_keep_first_occurrence() {
    let text = "1. Physics\n2. physics\n3. PHYSICS  \n4. Maths";
    let items = parse_list(text, ListStyle::Numbered).unwrap();
    assert_eq!(items, ["Physics", "Maths"]);
  }

  #[test]
  fn empty_reply_is_an_error() {
    assert!(matches!(
      parse_list("  \n ", ListStyle::Numbered),
      Err(ParseError::EmptyReply)
    ));
  }

  #[test]
  fn unmatched_format_is_distinguishable_from_empty() {
    assert!(matches!(
      parse_list("no markers here\nat all", ListStyle::Numbered),
      Err(ParseError::NoItems { expected: "numbered" })
    ));
  }

  #[test]
  fn college_sections_and_ratings() {
    let text = "India (All India):\n\
                1. IIT Madras \u{2013} NIRF #1\n\
                2. NIT Trichy \u{2013} Highly Reputed\n\
                \n\
                Tamil Nadu:\n\
                1. PSG College of Technology - Well-regarded\n\
                2. CEG Anna University\n";
    let colleges = parse_college_list(text).unwrap();
    assert_eq!(colleges.len(), 4);
    assert_eq!(colleges[0].name, "IIT Madras");
    assert_eq!(colleges[0].location_state.as_deref(), Some("India (All India)"));
    assert_eq!(colleges[0].rating.as_deref(), Some("NIRF #1"));
    assert_eq!(colleges[2].name, "PSG College of Technology");
    assert_eq!(colleges[2].location_state.as_deref(), Some("Tamil Nadu"));
    assert_eq!(colleges[2].rating.as_deref(), Some("Well-regarded"));
    assert_eq!(colleges[3].rating, None);
  }

  #[test]
  fn college_duplicate_across_sections_kept_once() {
    let text = "India (All India):\n1. NIT Trichy \u{2013} NIRF #9\n\
                Tamil Nadu:\n1. NIT Trichy \u{2013} NIRF #9\n";
    let colleges = parse_college_list(text).unwrap();
    assert_eq!(colleges.len(), 1);
  }
}
