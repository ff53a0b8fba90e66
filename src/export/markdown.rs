//! Markdown document sink, for terminals and plain-text archives

use tabled::{builder::Builder, settings::Style};

use super::{DocumentSink, SinkError, MARKDOWN_MIME};
use crate::report::document::{Cell, ReportDocument, ReportTable};

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownSink;

impl MarkdownSink {
    pub fn render_string(&self, document: &ReportDocument) -> String {
        let mut output = String::new();
        output.push_str(&format!("_{}_\n\n", document.header_text));
        output.push_str(&format!("# {}\n", document.title));

        for section in &document.sections {
            output.push_str(&format!("\n## {}\n\n", section.title));
            for table in &section.tables {
                output.push_str(&render_table(table));
                output.push('\n');
            }
        }

        let flagged = document.flagged_cells().count();
        if flagged > 0 {
            output.push_str(&format!(
                "\n> ⚠ {} value(s) outside target range\n",
                flagged
            ));
        }
        output
    }
}

impl DocumentSink for MarkdownSink {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn mime_type(&self) -> &'static str {
        MARKDOWN_MIME
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, SinkError> {
        Ok(self.render_string(document).into_bytes())
    }
}

fn render_table(table: &ReportTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.kind.captions().iter().map(|c| c.to_string()));

    for row in &table.rows {
        let mut record = Vec::with_capacity(table.columns());
        for cell in row {
            record.push(cell_text(cell));
            // Markdown has no merged cells; pad the spanned columns
            record.extend(std::iter::repeat(String::new()).take(cell.col_span.saturating_sub(1)));
        }
        builder.push_record(record);
    }

    builder.build().with(Style::markdown()).to_string()
}

fn cell_text(cell: &Cell) -> String {
    let text = cell.text.replace('|', "\\|").replace('\n', " ");
    let text = if cell.bold && !text.is_empty() {
        format!("**{}**", text)
    } else {
        text
    };
    match &cell.advisory {
        Some(note) => format!("{} ⚠ {}", text, note),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{InspectionHeader, InspectionRecord};
    use chrono::NaiveDate;

    fn document() -> ReportDocument {
        let record = InspectionRecord::new(InspectionHeader::new(
            "Rodin",
            "Group A",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        ))
        .with_field("safety", "equipment_tags", "OK")
        .with_field("operating", "rake_lift_pressure", 11.5);
        crate::report::assemble(&record).unwrap()
    }

    #[test]
    fn test_sections_and_values() {
        let md = MarkdownSink.render_string(&document());
        assert!(md.contains("# Thickener Hydraulic Power Pack CM Check Sheet"));
        assert!(md.contains("## Safety"));
        assert!(md.contains("## Hydraulic Oil Supply Pump"));
        assert!(md.contains("**Equipment Tags**"));
        assert!(md.contains("Rodin / Group A"));
        assert!(md.contains("15/03/2024"));
    }

    #[test]
    fn test_advisory_marker() {
        let md = MarkdownSink.render_string(&document());
        assert!(md.contains("11.5 ⚠ outside target range (9-10 MPa)"));
        assert!(md.contains("1 value(s) outside target range"));
    }

    #[test]
    fn test_cell_escaping() {
        let cell = Cell::text("a | b\nc");
        assert_eq!(cell_text(&cell), "a \\| b c");
    }
}
