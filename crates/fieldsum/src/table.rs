use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;

use crate::observation::{FieldRecord, Observation};
use crate::reshape;

/// Columns the input CSV must carry. Narrative sources included: the tool
/// treats their absence as a configuration error, not as empty narratives.
pub const REQUIRED_COLUMNS: [&str; 9] = [
  "field_id",
  "field_name",
  "client_name",
  "farm_name",
  "crop_name",
  "area",
  "pass_number",
  "mission_rec",
  "ag_assistant",
];

pub const SUMMARY_COLUMN: &str = "field_summary";

#[derive(Error, Debug)]
pub enum TableError {
  #[error("input is missing required columns: {columns}")]
  MissingColumns { columns: String },
}

impl TableError {
  pub fn missing_columns(columns: Vec<&str>) -> Self {
    Self::MissingColumns { columns: columns.join(", ") }
  }
}

/// Read and type the observation rows, validating the header first so a
/// schema mismatch reports every missing column in one error.
pub fn read_observations(path: &Path) -> Result<Vec<Observation>> {
  let mut reader = csv::Reader::from_path(path)
    .with_context(|| format!("failed to read input CSV at {}", path.display()))?;

  let headers = reader.headers().context("failed to read CSV header row")?.clone();
  let missing: Vec<&str> = REQUIRED_COLUMNS
    .into_iter()
    .filter(|column| !headers.iter().any(|header| header == *column))
    .collect();
  if !missing.is_empty() {
    return Err(TableError::missing_columns(missing).into());
  }

  let mut rows = Vec::new();
  for (line, result) in reader.deserialize::<Observation>().enumerate() {
    let row = result.with_context(|| format!("malformed observation row {}", line + 1))?;
    rows.push(row);
  }
  Ok(rows)
}

/// Write the wide table: the six descriptive attributes, one "Flight {n}"
/// column per observed pass number, then the summary column. Unfilled flight
/// slots serialize as empty cells.
pub fn write_summaries(path: &Path, records: &[FieldRecord], summaries: &[String]) -> Result<()> {
  let flight_numbers = reshape::flight_numbers(records);

  let mut writer = csv::Writer::from_path(path)
    .with_context(|| format!("failed to open output CSV at {}", path.display()))?;

  let mut header: Vec<String> =
    ["field_id", "field_name", "client_name", "farm_name", "crop_name", "area"]
      .into_iter()
      .map(str::to_string)
      .collect();
  header.extend(flight_numbers.iter().map(|n| format!("Flight {n}")));
  header.push(SUMMARY_COLUMN.to_string());
  writer.write_record(&header).context("failed to write CSV header")?;

  for (record, summary) in records.iter().zip(summaries) {
    let key = &record.key;
    let mut row = vec![
      key.field_id.as_str(),
      key.field_name.as_str(),
      key.client_name.as_str(),
      key.farm_name.as_str(),
      key.crop_name.as_str(),
      key.area.as_str(),
    ];
    row.extend(flight_numbers.iter().map(|n| record.flight(*n).unwrap_or("")));
    row.push(summary.as_str());
    writer.write_record(&row).context("failed to write CSV row")?;
  }

  writer.flush().with_context(|| format!("failed to write output CSV at {}", path.display()))?;
  Ok(())
}
