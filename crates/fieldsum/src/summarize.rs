use tokio::time::{sleep, Duration};
use tracing::warn;

use crate::client::Generator;
use crate::observation::FieldRecord;

/// Fixed system-level instruction sent ahead of every per-field prompt
pub const SUMMARY_TONE: &str = "You are an expert retail agronomist.
Write a season-oriented summary in 2\u{2013}3 sentences. Be concrete and concise.
- Track EARLY vs LATE season dynamics.
- Cover when relevant: emergence, weeds, disease (incl. Tar Spot), nutrient deficiencies, insect damage.
- Mention %s or locations (NE/NW/SE/SW/north/east/etc.) if present.
- Only report findings supported by the flight notes; do not invent threats.
- Do not make recommendations for the current season as it has already passed.
- If flight notes conflict (i.e. tar spot was or was not identified), err on the side of caution and omit the finding.
- No fluff or generic megillah; use field specifics if provided. Max ~420 chars.";

const NO_NARRATIVES: &str = "- No flight narratives available.";

/// How generation failures are retried before giving up on a field
#[derive(Debug, Clone)]
pub struct RetryPolicy {
  /// Total attempts per field
  pub retries: u32,
  /// Base backoff in seconds; the wait after failed attempt n is `base * n`
  pub backoff_secs: f64,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self { retries: 3, backoff_secs: 2.0 }
  }
}

/// Bullet-line blob of the field's narratives, in flight order
pub fn build_flight_blob(record: &FieldRecord) -> String {
  let parts: Vec<String> = record
    .flights
    .iter()
    .filter(|(_, text)| !text.trim().is_empty())
    .map(|(pass_number, text)| format!("- Flight {}: {}", pass_number, text.trim()))
    .collect();

  if parts.is_empty() {
    NO_NARRATIVES.to_string()
  } else {
    parts.join("\n")
  }
}

fn field_prompt(record: &FieldRecord) -> String {
  format!(
    "Field: {field_name} (ID {field_id}) \u{2014} Client: {client_name}\n\
     Flight notes:\n\
     {flight_blob}\n\
     \n\
     Task: Summarize the season (early vs late). Keep it tight (\u{2264}420 chars).",
    field_name = record.key.field_name,
    field_id = record.key.field_id,
    client_name = record.key.client_name,
    flight_blob = build_flight_blob(record),
  )
}

/// Summarize one field, retrying failed generation calls with linear
/// backoff. Never fails: after the last attempt the error is folded into a
/// visible marker string so the run can finish the remaining fields.
pub async fn summarize_field(
  generator: &dyn Generator,
  model: &str,
  record: &FieldRecord,
  policy: &RetryPolicy,
) -> String {
  let input = format!("{SUMMARY_TONE}\n\n{}", field_prompt(record));

  let mut attempt = 0;
  loop {
    attempt += 1;
    match generator.generate(model, &input).await {
      Ok(text) => return text,
      Err(error) if attempt >= policy.retries => {
        warn!(field_id = %record.key.field_id, "giving up after {attempt} attempts");
        return format!("[LLM error] {error:#}");
      }
      Err(error) => {
        let wait = Duration::from_secs_f64(policy.backoff_secs * f64::from(attempt));
        warn!(
          field_id = %record.key.field_id,
          attempt,
          "generation failed, retrying in {:.1}s: {error:#}",
          wait.as_secs_f64()
        );
        sleep(wait).await;
      }
    }
  }
}
