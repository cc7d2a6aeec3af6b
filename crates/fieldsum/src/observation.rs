use serde::Deserialize;
use std::collections::BTreeMap;

/// One per-flight observation row from the input CSV
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
  pub field_id: String,
  pub field_name: String,
  pub client_name: String,
  pub farm_name: String,
  pub crop_name: String,
  pub area: String,
  pub pass_number: u32,
  pub mission_rec: Option<String>,
  pub ag_assistant: Option<String>,
}

impl Observation {
  /// Resolved narrative for this pass: `mission_rec` preferred,
  /// `ag_assistant` as fallback. Empty or whitespace-only text counts as
  /// absent.
  pub fn narrative(&self) -> Option<&str> {
    non_blank(self.mission_rec.as_deref()).or_else(|| non_blank(self.ag_assistant.as_deref()))
  }

  pub fn key(&self) -> FieldKey {
    FieldKey {
      field_id: self.field_id.clone(),
      field_name: self.field_name.clone(),
      client_name: self.client_name.clone(),
      farm_name: self.farm_name.clone(),
      crop_name: self.crop_name.clone(),
      area: self.area.clone(),
    }
  }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
  text.filter(|t| !t.trim().is_empty())
}

/// The six descriptive attributes that identify a field in the output
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
  pub field_id: String,
  pub field_name: String,
  pub client_name: String,
  pub farm_name: String,
  pub crop_name: String,
  pub area: String,
}

/// One field with its narratives spread across flight slots.
///
/// An unfilled slot is simply an absent map entry; no sentinel value is
/// carried for missing narratives.
#[derive(Debug, Clone)]
pub struct FieldRecord {
  pub key: FieldKey,
  pub flights: BTreeMap<u32, String>,
}

impl FieldRecord {
  pub fn new(key: FieldKey) -> Self {
    Self { key, flights: BTreeMap::new() }
  }

  pub fn flight(&self, pass_number: u32) -> Option<&str> {
    self.flights.get(&pass_number).map(String::as_str)
  }
}
