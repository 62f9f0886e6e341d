//! Async HTTP client wrapping the disha tool API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use disha_core::llm::ChatMessage;
use reqwest::Client;
use serde_json::{Value, json};

/// Connection settings for the disha API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the tool endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(60))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!("{}/api/tool", self.config.base_url.trim_end_matches('/'))
  }

  /// `POST /api/tool` with `{tool, input}`.
  async fn call(&self, tool: &str, input: Value) -> Result<Value> {
    let resp = self
      .client
      .post(self.url())
      .json(&json!({ "tool": tool, "input": input }))
      .send()
      .await
      .with_context(|| format!("POST /api/tool ({tool}) failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /api/tool ({tool}) → {}", resp.status()));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising {tool} reply"))
  }

  /// A tool that returns `string[]`.
  pub async fn list(&self, tool: &str, input: Value) -> Result<Vec<String>> {
    serde_json::from_value(self.call(tool, input).await?)
      .with_context(|| format!("{tool} did not return a list"))
  }

  /// A tool that returns a bare string.
  pub async fn text(&self, tool: &str, input: Value) -> Result<String> {
    serde_json::from_value(self.call(tool, input).await?)
      .with_context(|| format!("{tool} did not return a string"))
  }

  /// The chat tool; replies arrive as `{content}`.
  pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
    let value = self.call("chat", serde_json::to_value(messages)?).await?;
    value
      .get("content")
      .and_then(Value::as_str)
      .map(str::to_string)
      .ok_or_else(|| anyhow!("chat reply is missing a content field"))
  }
}
