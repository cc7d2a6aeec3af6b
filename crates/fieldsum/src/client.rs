//! HTTP client for the text-generation service
//!
//! Thin wrapper over the OpenAI Responses API: one synchronous-feeling call
//! in, one trimmed message text out. The `Generator` trait is the seam the
//! summarizer works against so tests can inject stubs.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Configuration for the generation client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the API (e.g. "https://api.openai.com/v1")
  pub api_base: String,
  /// Bearer token for authentication
  pub api_key: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { api_base: DEFAULT_API_BASE.to_string(), api_key: String::new(), timeout_secs: 120 }
  }
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
  model: &'a str,
  input: &'a str,
}

/// The subset of a Responses API payload this tool consumes
#[derive(Debug, Deserialize)]
pub struct ResponsesPayload {
  pub output: Vec<OutputItem>,
}

/// Output items are a closed set of tagged kinds; anything this tool does
/// not understand folds into `Other` instead of failing deserialization.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
  Message { content: Vec<ContentItem> },
  Reasoning,
  #[serde(other)]
  Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
  OutputText { text: String },
  Refusal { refusal: String },
  #[serde(other)]
  Other,
}

impl ResponsesPayload {
  /// Text of the first message item's first content block, trimmed.
  pub fn message_text(&self) -> Result<String> {
    let content = self
      .output
      .iter()
      .find_map(|item| match item {
        OutputItem::Message { content } => Some(content),
        _ => None,
      })
      .ok_or_else(|| anyhow!("response contains no message output"))?;

    match content.first() {
      Some(ContentItem::OutputText { text }) => Ok(text.trim().to_string()),
      Some(ContentItem::Refusal { refusal }) => Err(anyhow!("model refused: {refusal}")),
      _ => Err(anyhow!("message output has no text content")),
    }
  }
}

/// Seam between the summarizer and the generation service
#[async_trait]
pub trait Generator {
  async fn generate(&self, model: &str, input: &str) -> Result<String>;
}

/// Production client for the Responses API
pub struct ResponsesClient {
  client: Client,
  config: ClientConfig,
}

impl ResponsesClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }
}

#[async_trait]
impl Generator for ResponsesClient {
  async fn generate(&self, model: &str, input: &str) -> Result<String> {
    let url = format!("{}/responses", self.config.api_base);
    let request = ResponsesRequest { model, input };

    let response =
      self.client.post(&url).bearer_auth(&self.config.api_key).json(&request).send().await?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      return Err(anyhow!("generation call failed: HTTP {status}: {body}"));
    }

    let payload: ResponsesPayload = response.json().await?;
    payload.message_text()
  }
}
