//! Record validation - pre-submit checks and advisory range warnings
//!
//! Missing header fields and schema mismatches are errors. Numeric values
//! outside their target range are advisories: they are reported, never
//! rejected, and the record can still be exported.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::record::InspectionRecord;
use crate::schema::registry::{SchemaError, SchemaRegistry, ValueKind};

/// A problem that blocks submission
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required header field is empty: {field}")]
    #[diagnostic(
        code(checksheet::validate::missing_header),
        help("enter the technician name and group before completing the inspection")
    )]
    MissingHeaderField { field: &'static str },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),
}

/// A value worth a second look; never blocks submission
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub section: String,
    pub field: String,
    pub label: String,
    pub value: String,
    pub message: String,
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}: {}", self.label, self.value, self.message)
    }
}

/// Outcome of validating one record
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub advisories: Vec<Advisory>,
}

impl ValidationReport {
    /// True when nothing blocks submission (advisories allowed)
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Record validator backed by the field schema
#[derive(Debug, Default)]
pub struct Validator {
    registry: SchemaRegistry,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the header only - the collector's pre-submit check
    pub fn check_header(&self, record: &InspectionRecord) -> Vec<ValidationError> {
        record
            .header
            .missing_required()
            .into_iter()
            .map(|field| ValidationError::MissingHeaderField { field })
            .collect()
    }

    /// Validate a whole record
    pub fn validate(&self, record: &InspectionRecord) -> ValidationReport {
        let mut report = ValidationReport {
            errors: self.check_header(record),
            advisories: Vec::new(),
        };

        for (section, data) in record.sections.iter() {
            if let Err(e) = self.registry.section(section) {
                report.errors.push(e.into());
                continue;
            }
            for (key, value) in data.iter() {
                let spec = match self.registry.field(section, key) {
                    Ok(spec) => spec,
                    Err(e) => {
                        report.errors.push(e.into());
                        continue;
                    }
                };

                let message = match spec.kind {
                    ValueKind::Numeric { .. } if !value.is_blank() && value.as_f64().is_none() => {
                        Some("not a number".to_string())
                    }
                    _ => spec.advisory_for(value),
                };

                if let Some(message) = message {
                    tracing::warn!(section, field = key, %value, "{}", message);
                    report.advisories.push(Advisory {
                        section: section.to_string(),
                        field: key.to_string(),
                        label: spec.display_label(),
                        value: value.to_string(),
                        message,
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{InspectionHeader, InspectionRecord};
    use chrono::NaiveDate;

    fn record(technician: &str, group: &str) -> InspectionRecord {
        InspectionRecord::new(InspectionHeader::new(
            technician,
            group,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        ))
    }

    #[test]
    fn test_clean_record() {
        let record = record("Rodin", "Group A")
            .with_field("operating", "rake_lift_pressure", 9.5)
            .with_field("reservoir", "delta_pressure", 120.0);
        let report = Validator::new().validate(&record);
        assert!(report.is_ok());
        assert!(report.advisories.is_empty());
    }

    #[test]
    fn test_missing_header_blocks() {
        let report = Validator::new().validate(&record("", ""));
        assert!(!report.is_ok());
        assert_eq!(
            report.errors,
            vec![
                ValidationError::MissingHeaderField {
                    field: "technician_name"
                },
                ValidationError::MissingHeaderField { field: "group" },
            ]
        );
    }

    #[test]
    fn test_range_violation_is_advisory_only() {
        let record = record("Rodin", "Group A")
            .with_field("operating", "rake_lift_pressure", 11.5)
            .with_field("reservoir", "delta_pressure", 300.0);
        let report = Validator::new().validate(&record);
        assert!(report.is_ok());
        assert_eq!(report.advisories.len(), 2);
        assert_eq!(report.advisories[0].field, "rake_lift_pressure");
        assert_eq!(report.advisories[0].value, "11.5");
        assert!(report.advisories[1].to_string().contains("< 300 kPa"));
    }

    #[test]
    fn test_non_numeric_reading_is_advisory() {
        let record = record("Rodin", "Group A").with_field("hydraulic_pump", "pump_temp", "hot");
        let report = Validator::new().validate(&record);
        assert!(report.is_ok());
        assert_eq!(report.advisories[0].message, "not a number");
    }

    #[test]
    fn test_schema_mismatch_is_error() {
        let record = record("Rodin", "Group A")
            .with_field("gearbox", "oil_level", "OK")
            .with_field("safety", "ladder", "OK");
        let report = Validator::new().validate(&record);
        assert_eq!(report.errors.len(), 2);
        assert!(matches!(
            report.errors[0],
            ValidationError::Schema(SchemaError::UnknownSection { .. })
        ));
        assert!(matches!(
            report.errors[1],
            ValidationError::Schema(SchemaError::UnknownField { .. })
        ));
    }
}
