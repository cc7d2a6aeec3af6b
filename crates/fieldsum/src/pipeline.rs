use anyhow::Result;
use std::path::PathBuf;
use tokio::time::{sleep, Duration};
use tracing::info;

use crate::client::Generator;
use crate::config::Config;
use crate::summarize::{self, RetryPolicy};
use crate::{reshape, table};

/// One full batch run: read the observation CSV, reshape to one record per
/// field, summarize each record in order, write the wide CSV. Returns the
/// output path on success.
///
/// Fields are processed strictly sequentially, with a fixed pause between
/// generation calls as the only rate control.
pub async fn run(config: &Config, generator: &dyn Generator) -> Result<PathBuf> {
  let rows = table::read_observations(&config.input)?;
  let records = reshape::reshape(&rows);
  info!(rows = rows.len(), fields = records.len(), "reshaped observations");

  let policy = RetryPolicy { retries: config.retries, backoff_secs: config.backoff_secs };

  let mut summaries = Vec::with_capacity(records.len());
  for record in &records {
    info!(field_id = %record.key.field_id, "summarizing field");
    let summary = summarize::summarize_field(generator, &config.model, record, &policy).await;
    summaries.push(summary);
    sleep(Duration::from_secs_f64(config.delay_secs)).await;
  }

  table::write_summaries(&config.output, &records, &summaries)?;
  Ok(config.output.clone())
}
