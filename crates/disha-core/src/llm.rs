//! The `TextModel` trait — the seam between the lookup tools and whatever
//! LLM provider backs them.
//!
//! Implemented by `disha-llm`'s Gemini client in production and by stub
//! models in tests. Tools never construct a model themselves; the process
//! entry point owns the client and passes it down.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  User,
  Assistant,
}

/// One turn of a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role:    Role,
  pub content: String,
}

/// Abstraction over an LLM text-generation endpoint.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`).
pub trait TextModel: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Single-shot generation: one prompt in, raw reply text out.
  fn generate<'a>(
    &'a self,
    prompt: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Multi-turn chat. `messages` must start with a user turn and end with
  /// the user turn to answer; enforcing that is the caller's job (the chat
  /// tool strips the synthetic greeting before calling this).
  fn chat<'a>(
    &'a self,
    messages: &'a [ChatMessage],
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
