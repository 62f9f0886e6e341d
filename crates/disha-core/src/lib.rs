//! Core types and trait definitions for the disha career-counseling service.
//!
//! No HTTP, no database, no LLM client here: every other crate depends on
//! this one, and this one depends only on serde, chrono, and thiserror.

pub mod entity;
pub mod llm;
pub mod name;
pub mod parse;
pub mod store;
pub mod wizard;

pub use parse::{ListStyle, ParseError};
