//! Export sinks - turn assembled reports and flattened rows into files

pub mod csv;
pub mod docx;
pub mod markdown;

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use thiserror::Error;

use crate::report::document::ReportDocument;

pub use self::csv::CsvSink;
pub use self::docx::DocxSink;
pub use self::markdown::MarkdownSink;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const CSV_MIME: &str = "text/csv";
pub const MARKDOWN_MIME: &str = "text/markdown";
pub const JSON_MIME: &str = "application/json";

/// Errors writing an export
#[derive(Debug, Error, Diagnostic)]
pub enum SinkError {
    #[error("IO error: {0}")]
    #[diagnostic(code(checksheet::export::io))]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    #[diagnostic(code(checksheet::export::csv))]
    Csv(#[from] ::csv::Error),

    #[error("Could not package DOCX document: {0}")]
    #[diagnostic(code(checksheet::export::docx))]
    Docx(String),

    #[error("JSON error: {0}")]
    #[diagnostic(code(checksheet::export::json))]
    Json(#[from] serde_json::Error),
}

/// Serializes a report document to a file format
pub trait DocumentSink {
    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, SinkError>;
}

/// Pretty-printed JSON of the document tree
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSink;

impl DocumentSink for JsonSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        JSON_MIME
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, SinkError> {
        let mut bytes = serde_json::to_vec_pretty(document)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// `inspection_report_<YYYYMMDD_HHMMSS>.<ext>`
pub fn report_file_name(extension: &str, at: DateTime<Utc>) -> String {
    format!("inspection_report_{}.{}", timestamp(at), extension)
}

/// `inspection_data_<YYYYMMDD_HHMMSS>.csv`
pub fn data_file_name(at: DateTime<Utc>) -> String {
    format!("inspection_data_{}.csv", timestamp(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_names() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 9, 5, 7).unwrap();
        assert_eq!(
            report_file_name("docx", at),
            "inspection_report_20240315_090507.docx"
        );
        assert_eq!(data_file_name(at), "inspection_data_20240315_090507.csv");
    }

    #[test]
    fn test_json_sink() {
        let record = crate::core::record::InspectionRecord::new(
            crate::core::record::InspectionHeader::new(
                "Rodin",
                "Group A",
                chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            ),
        );
        let doc = crate::report::assemble(&record).unwrap();
        let bytes = JsonSink.render(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["sections"][0]["title"], "Inspection Details");
        assert_eq!(JsonSink.mime_type(), "application/json");
    }
}
