//! JSON tool API for Disha.
//!
//! Exposes an axum [`Router`] with a single dispatch endpoint,
//! `POST /api/tool`, backed by any [`CounselStore`] and [`TextModel`].
//! TLS and transport concerns are the caller's responsibility.

pub mod dispatch;
pub mod error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::post};
use disha_core::{llm::TextModel, store::CounselStore};
use disha_llm::GeminiConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub gemini:     GeminiConfig,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the dispatcher.
#[derive(Clone)]
pub struct AppState<S, M> {
  pub store: Arc<S>,
  pub model: Arc<M>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the tool API.
pub fn router<S, M>(state: AppState<S, M>) -> Router
where
  S: CounselStore + Clone + Send + Sync + 'static,
  M: TextModel + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/api/tool", post(dispatch::handler::<S, M>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
