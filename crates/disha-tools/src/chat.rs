//! The `chat` tool — a stateless wrapper around the model's chat API,
//! independent of the wizard.

use disha_core::llm::{ChatMessage, Role, TextModel};
use serde::Serialize;

/// The reply envelope: `{ "content": "..." }`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
  pub content: String,
}

const EMPTY_PROMPT: &str = "Please provide a message to chat.";
const CHAT_UNAVAILABLE: &str =
  "I'm sorry, I couldn't get a response from the AI at this time. Please try again later.";

/// Forward a message history to the model and return its reply.
///
/// The front-end seeds its transcript with a synthetic assistant greeting;
/// the model API requires history to begin with a user turn, so a leading
/// assistant message is stripped here before forwarding.
pub async fn chat_reply<M>(model: &M, mut messages: Vec<ChatMessage>) -> ChatReply
where
  M: TextModel,
{
  if let Some(first) = messages.first()
    && first.role == Role::Assistant
  {
    messages.remove(0);
  }

  if !messages.iter().any(|m| m.role == Role::User) {
    return ChatReply { content: EMPTY_PROMPT.to_string() };
  }

  match model.chat(&messages).await {
    Ok(content) => ChatReply { content },
    Err(err) => {
      tracing::warn!(error = %err, "chat reply failed");
      ChatReply { content: CHAT_UNAVAILABLE.to_string() }
    }
  }
}
