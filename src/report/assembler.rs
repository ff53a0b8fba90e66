//! Report assembler - InspectionRecord to ReportDocument

use miette::Diagnostic;
use thiserror::Error;

use crate::core::config::Branding;
use crate::core::record::InspectionRecord;
use crate::report::document::{Cell, FontHint, ReportDocument, ReportSection, ReportTable, TableKind};
use crate::schema::registry::{FieldSpec, SchemaError, SchemaRegistry, SectionId, SectionLayout};

/// Errors raised while assembling a report
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Malformed inspection record: missing {}", .missing.join(", "))]
    #[diagnostic(
        code(checksheet::report::malformed_record),
        help("technician name and group must be filled in before a report can be produced")
    )]
    MalformedRecord { missing: Vec<&'static str> },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),
}

/// Builds report documents under one branding
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    branding: Branding,
    registry: SchemaRegistry,
}

impl ReportAssembler {
    pub fn new(branding: Branding) -> Self {
        Self {
            branding,
            registry: SchemaRegistry::new(),
        }
    }

    /// Assemble the printable report for one record
    ///
    /// The header is checked before anything is built, then every section and
    /// field in the record is matched against the registry. Fields missing
    /// from the record render as empty cells.
    pub fn assemble(&self, record: &InspectionRecord) -> Result<ReportDocument, ReportError> {
        self.check(record)?;

        let mut sections = Vec::with_capacity(SectionId::ALL.len() + 1);
        sections.push(self.details_section(record));
        for &section in self.registry.sections() {
            sections.push(self.inspection_section(record, section));
        }

        tracing::debug!(
            sections = sections.len(),
            equipment = %record.header.equipment_tag,
            "assembled report"
        );

        Ok(ReportDocument {
            header_text: self.branding.header_text(),
            title: self.branding.title.clone(),
            font: FontHint::default(),
            sections,
        })
    }

    /// Reject records with empty required header fields or fields the
    /// registry does not know; shared by every export path
    pub fn check(&self, record: &InspectionRecord) -> Result<(), ReportError> {
        let missing = record.header.missing_required();
        if !missing.is_empty() {
            tracing::error!(?missing, "record has empty required header fields");
            return Err(ReportError::MalformedRecord { missing });
        }
        self.check_schema(record)?;
        Ok(())
    }

    fn check_schema(&self, record: &InspectionRecord) -> Result<(), SchemaError> {
        for (section, data) in record.sections.iter() {
            let fields = self.registry.fields_for(section).inspect_err(|e| {
                tracing::error!(error = %e, "record does not match the field schema");
            })?;
            if let Some(key) = data.keys().find(|k| !fields.iter().any(|f| f.key == *k)) {
                let err = SchemaError::UnknownField {
                    section: section.to_string(),
                    field: key.to_string(),
                };
                tracing::error!(error = %err, "record does not match the field schema");
                return Err(err);
            }
        }
        Ok(())
    }

    fn details_section(&self, record: &InspectionRecord) -> ReportSection {
        let header = &record.header;
        let mut table = ReportTable::new(TableKind::Header);

        table.push_row(vec![
            Cell::bold("Check by"),
            Cell::text(format!("{} / {}", header.technician_name, header.group)),
            Cell::bold("Date"),
            Cell::text(header.inspection_date.format("%d/%m/%Y").to_string()),
        ]);
        table.push_row(vec![
            Cell::bold("Equipment Tag #"),
            Cell::text(&header.equipment_tag),
            Cell::bold("Work Order #"),
            Cell::text(&header.wo_number),
        ]);
        table.push_row(vec![
            Cell::bold("Inspection Type"),
            Cell::text(header.inspection_type.label()).spanning(3),
        ]);
        table.push_row(vec![
            Cell::bold("Visual Check"),
            Cell::text(check_mark(header.visual_check)),
            Cell::bold("Vibration Check"),
            Cell::text(check_mark(header.vibration_check)),
        ]);

        ReportSection {
            key: None,
            title: "Inspection Details".to_string(),
            tables: vec![table],
        }
    }

    fn inspection_section(&self, record: &InspectionRecord, section: SectionId) -> ReportSection {
        let fields = section.fields();
        let table = match section.layout() {
            SectionLayout::Checklist => {
                single_column_table(TableKind::Checklist, record, section, fields)
            }
            SectionLayout::Measurement => {
                single_column_table(TableKind::Measurement, record, section, fields)
            }
            SectionLayout::Paired(pairs) => paired_table(record, section, pairs),
        };

        ReportSection {
            key: Some(section.as_str().to_string()),
            title: section.title().to_string(),
            tables: vec![table],
        }
    }
}

/// Assemble a report with the default branding
pub fn assemble(record: &InspectionRecord) -> Result<ReportDocument, ReportError> {
    ReportAssembler::default().assemble(record)
}

fn check_mark(checked: bool) -> &'static str {
    if checked {
        "✓"
    } else {
        "✗"
    }
}

fn label_cell(spec: &FieldSpec) -> Cell {
    Cell::bold(spec.display_label())
}

fn value_cell(record: &InspectionRecord, spec: &FieldSpec) -> Cell {
    match record.field(spec.section.as_str(), spec.key) {
        Some(value) => Cell::text(value.to_string()).with_advisory(spec.advisory_for(value)),
        None => Cell::text(""),
    }
}

fn comments_row(table: &mut ReportTable, record: &InspectionRecord, section: SectionId) {
    if let Some(spec) = section.fields().iter().find(|f| f.is_comments()) {
        let text = record.display_value(section.as_str(), spec.key);
        table.push_full_width(Cell::text(format!("{}: {}", spec.label, text)));
    }
}

fn single_column_table(
    kind: TableKind,
    record: &InspectionRecord,
    section: SectionId,
    fields: &[FieldSpec],
) -> ReportTable {
    let mut table = ReportTable::new(kind);
    for spec in fields.iter().filter(|f| !f.is_comments()) {
        table.push_row(vec![label_cell(spec), value_cell(record, spec)]);
    }
    comments_row(&mut table, record, section);
    table
}

fn paired_table(
    record: &InspectionRecord,
    section: SectionId,
    pairs: &[(&str, &str)],
) -> ReportTable {
    let mut table = ReportTable::new(TableKind::Paired);
    for (left, right) in pairs {
        let mut row = Vec::with_capacity(4);
        for key in [left, right] {
            match section.field(key) {
                Some(spec) => {
                    row.push(label_cell(spec));
                    row.push(value_cell(record, spec));
                }
                None => {
                    row.push(Cell::text(""));
                    row.push(Cell::text(""));
                }
            }
        }
        table.push_row(row);
    }
    comments_row(&mut table, record, section);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{InspectionHeader, InspectionRecord};
    use chrono::NaiveDate;

    fn header() -> InspectionHeader {
        InspectionHeader::new(
            "Rodin",
            "Group A",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        )
        .with_equipment_tag("31-TM-01")
        .with_wo_number("WO1234")
    }

    fn scenario_record() -> InspectionRecord {
        InspectionRecord::new(header())
            .with_field("safety", "equipment_tags", "OK")
            .with_field("operating", "rake_lift_pressure", 11.5)
    }

    fn value_for<'a>(table: &'a ReportTable, label: &str) -> &'a Cell {
        table
            .rows
            .iter()
            .find_map(|row| {
                row.windows(2)
                    .find(|pair| pair[0].text == label)
                    .map(|pair| &pair[1])
            })
            .unwrap_or_else(|| panic!("no row labelled {}", label))
    }

    #[test]
    fn test_section_order() {
        let doc = assemble(&scenario_record()).unwrap();
        let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Inspection Details",
                "Safety",
                "General Rake Operating Condition",
                "Reservoir",
                "Hydraulic Drive Unit",
                "Hydraulic Oil Supply Pump",
            ]
        );
    }

    #[test]
    fn test_out_of_range_value_is_flagged_verbatim() {
        let doc = assemble(&scenario_record()).unwrap();
        let operating = &doc.section("operating").unwrap().tables[0];
        let lift = value_for(operating, "Rake Lift Pressure (MPa)");
        assert_eq!(lift.text, "11.5");
        assert!(lift.advisory.as_deref().unwrap().contains("9-10"));

        let drive = value_for(operating, "Drive Hydraulic Supply Oil Pressure (MPa)");
        assert_eq!(drive.text, "");
        assert!(!drive.is_flagged());
        assert_eq!(doc.flagged_cells().count(), 1);
    }

    #[test]
    fn test_in_range_value_not_flagged() {
        let record = InspectionRecord::new(header()).with_field("operating", "rake_lift_pressure", 9.5);
        let doc = assemble(&record).unwrap();
        assert_eq!(doc.flagged_cells().count(), 0);
    }

    #[test]
    fn test_details_table() {
        let doc = assemble(&scenario_record()).unwrap();
        let details = &doc.sections[0].tables[0];
        assert_eq!(value_for(details, "Check by").text, "Rodin / Group A");
        assert_eq!(value_for(details, "Date").text, "15/03/2024");
        assert_eq!(value_for(details, "Equipment Tag #").text, "31-TM-01");
        assert_eq!(value_for(details, "Work Order #").text, "WO1234");
        let kind = value_for(details, "Inspection Type");
        assert_eq!(kind.text, "Thickener I Rake Drive Hydraulic Power Pack");
        assert_eq!(kind.col_span, 3);
        assert_eq!(value_for(details, "Visual Check").text, "✓");
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let record = InspectionRecord::new(header());
        let doc = assemble(&record).unwrap();
        let safety = &doc.section("safety").unwrap().tables[0];
        assert_eq!(value_for(safety, "Equipment Tags").text, "");
        assert_eq!(value_for(safety, "Terminal Box/Grounding Cables").text, "");
        let comments = safety.rows.last().unwrap();
        assert_eq!(comments[0].text, "Comments: ");
    }

    #[test]
    fn test_checklist_rows_and_comments_span() {
        let record = scenario_record().with_field("safety", "comments", "Grating loose near stairs");
        let doc = assemble(&record).unwrap();
        let safety = &doc.section("safety").unwrap().tables[0];
        assert_eq!(safety.kind, TableKind::Checklist);
        // four items plus the comments row
        assert_eq!(safety.rows.len(), 5);
        assert!(safety.rows[0][0].bold);
        assert!(!safety.rows[0][1].bold);
        assert_eq!(safety.rows[0][1].text, "OK");

        let comments = safety.rows.last().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].col_span, safety.columns());
        assert_eq!(comments[0].text, "Comments: Grating loose near stairs");
    }

    #[test]
    fn test_operating_has_no_comments_row() {
        let doc = assemble(&scenario_record()).unwrap();
        let operating = &doc.section("operating").unwrap().tables[0];
        assert_eq!(operating.kind, TableKind::Measurement);
        assert_eq!(operating.rows.len(), 3);
    }

    #[test]
    fn test_reservoir_pairs_status_with_reading() {
        let record = InspectionRecord::new(header())
            .with_field("reservoir", "prv2_temp", 48.0)
            .with_field("reservoir", "condensate", "Not OK")
            .with_field("reservoir", "delta_pressure", 320.0)
            .with_field("reservoir", "filter_color", "Yellow (Dirty)");
        let doc = assemble(&record).unwrap();
        let reservoir = &doc.section("reservoir").unwrap().tables[0];
        assert_eq!(reservoir.kind, TableKind::Paired);

        let row = &reservoir.rows[1];
        assert_eq!(row.len(), 4);
        assert_eq!(row[0].text, "Check hydraulic oil reservoir for condensate built up");
        assert_eq!(row[1].text, "Not OK");
        assert_eq!(row[2].text, "PRV 2 Temperature (°C)");
        assert_eq!(row[3].text, "48");

        let row = &reservoir.rows[3];
        assert_eq!(row[2].text, "Delta Pressure Across Filter (kPa)");
        assert_eq!(row[3].text, "320");
        assert!(row[3].is_flagged());

        assert_eq!(reservoir.rows[4][3].text, "Yellow (Dirty)");
        assert_eq!(reservoir.rows.last().unwrap()[0].col_span, 4);
    }

    #[test]
    fn test_tables_are_rectangular() {
        let doc = assemble(&scenario_record()).unwrap();
        for section in &doc.sections {
            for table in &section.tables {
                for row in &table.rows {
                    let width: usize = row.iter().map(|c| c.col_span).sum();
                    assert_eq!(width, table.columns(), "in {}", section.title);
                }
            }
        }
    }

    #[test]
    fn test_empty_technician_is_malformed() {
        let mut record = scenario_record();
        record.header.technician_name.clear();
        let err = assemble(&record).unwrap_err();
        assert_eq!(
            err,
            ReportError::MalformedRecord {
                missing: vec!["technician_name"]
            }
        );
    }

    #[test]
    fn test_empty_group_is_malformed() {
        let mut record = scenario_record();
        record.header.group = "   ".to_string();
        assert!(matches!(
            assemble(&record),
            Err(ReportError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_unknown_section_aborts() {
        let record = scenario_record().with_field("gearbox", "oil_level", "OK");
        let err = assemble(&record).unwrap_err();
        assert_eq!(
            err,
            ReportError::Schema(SchemaError::UnknownSection {
                section: "gearbox".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_field_aborts() {
        let record = scenario_record().with_field("safety", "fire_extinguisher", "OK");
        assert!(matches!(
            assemble(&record),
            Err(ReportError::Schema(SchemaError::UnknownField { .. }))
        ));
    }

    #[test]
    fn test_check_matches_assemble() {
        let assembler = ReportAssembler::default();
        assert_eq!(assembler.check(&scenario_record()), Ok(()));

        let mut blank = scenario_record();
        blank.header.technician_name.clear();
        blank.header.group.clear();
        assert_eq!(
            assembler.check(&blank),
            Err(ReportError::MalformedRecord {
                missing: vec!["technician_name", "group"]
            })
        );

        let unknown = scenario_record().with_field("Visual", "Check", "bogus");
        assert!(matches!(
            assembler.check(&unknown),
            Err(ReportError::Schema(SchemaError::UnknownSection { .. }))
        ));
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let record = scenario_record();
        assert_eq!(assemble(&record).unwrap(), assemble(&record).unwrap());
    }

    #[test]
    fn test_branding_only_touches_header_and_title() {
        let record = scenario_record();
        let default = assemble(&record).unwrap();
        let branded = ReportAssembler::new(Branding::preset("vibro-sens").unwrap())
            .assemble(&record)
            .unwrap();
        assert!(branded.header_text.starts_with("VIBRO-SENS"));
        assert_eq!(default.sections, branded.sections);
    }
}
