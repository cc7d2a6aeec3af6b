//! Fieldsum - Season Field Summaries
//!
//! Pivots per-flight agronomic observation rows into one row per field and
//! generates a short season summary for each field via a text-generation
//! service, writing the result back out as CSV.

pub mod client;
pub mod config;
pub mod observation;
pub mod pipeline;
pub mod reshape;
pub mod summarize;
pub mod table;
