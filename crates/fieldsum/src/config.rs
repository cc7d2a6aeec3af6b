use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::client;

pub const DEFAULT_MODEL: &str = "gpt-4.1";
pub const MODEL_ENV: &str = "LLM_MODEL";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const API_BASE_ENV: &str = "FIELDSUM_API_BASE";

/// Everything a run needs, resolved once at startup.
///
/// Precedence for each knob is explicit flag > environment variable >
/// built-in default.
#[derive(Debug, Clone)]
pub struct Config {
  pub input: PathBuf,
  pub output: PathBuf,
  pub model: String,
  /// Pause between generation calls, in seconds
  pub delay_secs: f64,
  /// Total generation attempts per field
  pub retries: u32,
  /// Base backoff between attempts, in seconds
  pub backoff_secs: f64,
  pub api_base: String,
  pub api_key: String,
}

impl Config {
  pub fn resolve(
    input: PathBuf,
    output: Option<PathBuf>,
    model: Option<String>,
    delay_secs: f64,
    retries: u32,
    backoff_secs: f64,
  ) -> Result<Self> {
    let output = output.unwrap_or_else(|| default_output_path(&input));
    let model = model
      .or_else(|| env::var(MODEL_ENV).ok())
      .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let api_base =
      env::var(API_BASE_ENV).unwrap_or_else(|_| client::DEFAULT_API_BASE.to_string());
    let api_key = env::var(API_KEY_ENV)
      .with_context(|| format!("{API_KEY_ENV} is not set; it is required for generation calls"))?;

    Ok(Self { input, output, model, delay_secs, retries, backoff_secs, api_base, api_key })
  }
}

/// Default output path: "-summarized" inserted before the extension, placed
/// next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
  let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
  let name = match input.extension() {
    Some(ext) => format!("{stem}-summarized.{}", ext.to_string_lossy()),
    None => format!("{stem}-summarized"),
  };
  input.with_file_name(name)
}
