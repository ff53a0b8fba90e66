//! Checksheet: condition-monitoring inspection check sheets
//!
//! Inspections of a thickener hydraulic power pack are kept as plain YAML
//! records. A record is assembled into a printable report document (Word,
//! Markdown or JSON) and flattened into CSV rows for trend analysis.

pub mod cli;
pub mod core;
pub mod export;
pub mod report;
pub mod schema;
pub mod yaml;
