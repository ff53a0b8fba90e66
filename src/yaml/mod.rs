//! Record file reading and writing

pub mod diagnostics;

pub use diagnostics::{RecordError, RecordSyntaxError};

use std::path::Path;

use crate::core::record::InspectionRecord;

/// Parse a record from YAML text; `filename` labels the diagnostic
pub fn parse_record(source: &str, filename: &str) -> Result<InspectionRecord, RecordError> {
    serde_yml::from_str(source)
        .map_err(|e| RecordSyntaxError::from_serde_error(&e, source, filename).into())
}

/// Read and parse a record file
pub fn load_record(path: &Path) -> Result<InspectionRecord, RecordError> {
    let source = std::fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let record = parse_record(&source, &path.display().to_string())?;
    tracing::debug!(
        path = %path.display(),
        sections = record.sections.len(),
        "loaded record"
    );
    Ok(record)
}

/// Serialize a record as YAML
pub fn record_to_yaml(record: &InspectionRecord) -> Result<String, serde_yml::Error> {
    serde_yml::to_string(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_message() {
        let err = parse_record("header:\n  technician_name: Rodin\n", "bad.yaml").unwrap_err();
        match err {
            RecordError::Syntax(e) => assert!(e.message().contains("inspection_date")),
            RecordError::Io { .. } => panic!("expected a syntax error"),
        }
    }

    #[test]
    fn test_yaml_round_trip() {
        let source = "\
header:
  technician_name: Rodin
  group: Group A
  inspection_date: 2024-03-15
sections:
  operating:
    rake_lift_pressure: 11.5
  safety:
    equipment_tags: Not OK
";
        let record = parse_record(source, "r.yaml").unwrap();
        let yaml = record_to_yaml(&record).unwrap();
        let again = parse_record(&yaml, "r.yaml").unwrap();
        assert_eq!(record, again);
    }

    #[test]
    fn test_empty_section_loads() {
        let source = "\
header:
  technician_name: Rodin
  group: Group A
  inspection_date: 2024-03-15
sections:
  safety:
  operating:
    rake_lift_pressure: 9.5
";
        let record = parse_record(source, "r.yaml").unwrap();
        assert_eq!(record.sections.len(), 2);
        assert!(record.sections.get("safety").unwrap().is_empty());
        assert_eq!(record.display_value("operating", "rake_lift_pressure"), "9.5");
        assert!(crate::report::assemble(&record).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = load_record(Path::new("/nonexistent/record.yaml")).unwrap_err();
        assert!(matches!(err, RecordError::Io { .. }));
    }
}
