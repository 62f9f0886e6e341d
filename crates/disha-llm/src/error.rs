//! Error type for `disha-llm`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No API key was supplied; the client can be constructed but not used.
  #[error("no Gemini API key configured")]
  NotConfigured,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("gemini returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("gemini reply contained no text")]
  EmptyReply,

  #[error("chat history must contain a user message")]
  EmptyHistory,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
