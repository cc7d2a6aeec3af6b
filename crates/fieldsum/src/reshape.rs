use std::collections::{HashMap, HashSet};

use crate::observation::{FieldKey, FieldRecord, Observation};

/// Reshape long-format observation rows (one per field x pass) into one
/// record per field, with narratives spread across flight slots.
///
/// Rows with a duplicate `(field_id, pass_number)` pair are dropped, keeping
/// the first occurrence in input order. Field records come out in first-seen
/// order. A field whose kept rows all lack a narrative still produces a
/// record, just with no filled slots.
pub fn reshape(rows: &[Observation]) -> Vec<FieldRecord> {
  let mut seen: HashSet<(String, u32)> = HashSet::new();
  let mut index: HashMap<FieldKey, usize> = HashMap::new();
  let mut records: Vec<FieldRecord> = Vec::new();

  for row in rows {
    if !seen.insert((row.field_id.clone(), row.pass_number)) {
      continue;
    }

    let key = row.key();
    let slot = *index.entry(key.clone()).or_insert_with(|| {
      records.push(FieldRecord::new(key));
      records.len() - 1
    });

    if let Some(text) = row.narrative() {
      records[slot].flights.entry(row.pass_number).or_insert_with(|| text.to_string());
    }
  }

  records
}

/// Sorted distinct pass numbers with at least one narrative anywhere in the
/// table. These become the "Flight {n}" output columns.
pub fn flight_numbers(records: &[FieldRecord]) -> Vec<u32> {
  let mut numbers: Vec<u32> = records
    .iter()
    .flat_map(|record| record.flights.keys().copied())
    .collect::<HashSet<u32>>()
    .into_iter()
    .collect();
  numbers.sort_unstable();
  numbers
}
