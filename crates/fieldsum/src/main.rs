use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use fieldsum::client::{ClientConfig, ResponsesClient};
use fieldsum::config::Config;
use fieldsum::pipeline;

#[derive(Parser)]
#[command(name = "fieldsum")]
#[command(
  about = "Fieldsum - Season Field Summaries\nPivots per-flight agronomy notes into one row per field and generates a season summary for each"
)]
#[command(version)]
struct Cli {
  /// Input CSV path
  #[arg(long)]
  input: PathBuf,

  /// Output CSV path; defaults to [input]-summarized next to the input
  #[arg(long)]
  output: Option<PathBuf>,

  /// Model identifier (or set LLM_MODEL; falls back to gpt-4.1)
  #[arg(long)]
  model: Option<String>,

  /// Delay between generation calls in seconds (simple rate control)
  #[arg(long, default_value_t = 0.25)]
  delay: f64,

  /// Generation attempts per field before writing an error marker
  #[arg(long, default_value_t = 3)]
  retries: u32,

  /// Base backoff in seconds; the wait after failed attempt n is backoff * n
  #[arg(long, default_value_t = 2.0)]
  backoff: f64,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::new("fieldsum=info,warn")
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  let config =
    Config::resolve(cli.input, cli.output, cli.model, cli.delay, cli.retries, cli.backoff)?;

  let client = ResponsesClient::new(ClientConfig {
    api_base: config.api_base.clone(),
    api_key: config.api_key.clone(),
    ..ClientConfig::default()
  })?;

  let output = pipeline::run(&config, &client).await?;
  println!("Saved: {}", output.display());

  Ok(())
}
