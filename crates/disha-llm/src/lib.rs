//! Gemini client for disha.
//!
//! Implements [`TextModel`] over the Google Generative Language REST API
//! (`models/{model}:generateContent`). The client is constructed once by
//! the process entry point and shared; cloning is cheap because the inner
//! [`reqwest::Client`] is `Arc`-based.

pub mod error;

use std::time::Duration;

use disha_core::llm::{ChatMessage, Role, TextModel};
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for the Gemini API.
///
/// An empty `api_key` is allowed: the client constructs fine and every call
/// fails with [`Error::NotConfigured`], which the lookup tools degrade to
/// an empty result.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
  #[serde(default)]
  pub api_key:  String,
  #[serde(default = "GeminiConfig::default_model")]
  pub model:    String,
  #[serde(default = "GeminiConfig::default_base_url")]
  pub base_url: String,
}

impl GeminiConfig {
  fn default_model() -> String {
    DEFAULT_MODEL.to_string()
  }

  fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
  }
}

impl Default for GeminiConfig {
  fn default() -> Self {
    GeminiConfig {
      api_key:  String::new(),
      model:    Self::default_model(),
      base_url: Self::default_base_url(),
    }
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
  contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
  role:  String,
  parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
  text: String,
}

impl Content {
  fn user(text: impl Into<String>) -> Self {
    Content { role: "user".into(), parts: vec![Part { text: text.into() }] }
  }

  fn from_message(msg: &ChatMessage) -> Self {
    // Gemini calls the assistant side "model".
    let role = match msg.role {
      Role::User => "user",
      Role::Assistant => "model",
    };
    Content {
      role:  role.into(),
      parts: vec![Part { text: msg.content.clone() }],
    }
  }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Content,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// A Gemini text-generation client. Cheap to clone.
#[derive(Clone)]
pub struct Gemini {
  http:   reqwest::Client,
  config: GeminiConfig,
}

impl Gemini {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Gemini { http, config })
  }

  fn url(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    )
  }

  async fn request(&self, contents: Vec<Content>) -> Result<String> {
    if self.config.api_key.is_empty() {
      return Err(Error::NotConfigured);
    }

    let resp = self
      .http
      .post(self.url())
      .header("x-goog-api-key", &self.config.api_key)
      .json(&GenerateRequest { contents })
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      tracing::warn!(status = status.as_u16(), "gemini request failed");
      return Err(Error::Status { status: status.as_u16(), body });
    }

    let body: GenerateResponse = resp.json().await?;
    let text: String = body
      .candidates
      .first()
      .map(|c| {
        c.content
          .parts
          .iter()
          .map(|p| p.text.as_str())
          .collect::<Vec<_>>()
          .join("")
      })
      .unwrap_or_default();

    if text.trim().is_empty() {
      return Err(Error::EmptyReply);
    }
    Ok(text)
  }
}

impl TextModel for Gemini {
  type Error = Error;

  async fn generate(&self, prompt: &str) -> Result<String> {
    self.request(vec![Content::user(prompt)]).await
  }

  async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
    if !messages.iter().any(|m| m.role == Role::User) {
      return Err(Error::EmptyHistory);
    }
    let contents = messages.iter().map(Content::from_message).collect();
    self.request(contents).await
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
