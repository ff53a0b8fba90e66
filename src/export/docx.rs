//! DOCX document sink

use docx_rs::{
    AlignmentType, Docx, Header, Paragraph, Run, RunFonts, Table, TableCell, TableRow, WidthType,
};
use std::io::Cursor;

use super::{DocumentSink, SinkError, DOCX_MIME};
use crate::report::document::{Cell, ReportDocument, ReportTable};

/// Colour of out-of-range values
const ADVISORY_COLOR: &str = "C00000";

/// Word (.docx) renderer
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxSink;

impl DocumentSink for DocxSink {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn mime_type(&self) -> &'static str {
        DOCX_MIME
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, SinkError> {
        let header = Header::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(&document.header_text))
                .align(AlignmentType::Center),
        );

        let mut docx = Docx::new()
            .header(header)
            .default_fonts(RunFonts::new().ascii(&document.font.family))
            .default_size(document.font.size)
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(&document.title).bold().size(36))
                    .align(AlignmentType::Center),
            );

        for section in &document.sections {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(&section.title).bold().size(28)),
            );
            for table in &section.tables {
                docx = docx.add_table(build_table(table));
            }
        }

        let mut buf = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buf)
            .map_err(|e| SinkError::Docx(e.to_string()))?;
        tracing::debug!(bytes = buf.get_ref().len(), "packed docx");
        Ok(buf.into_inner())
    }
}

fn build_table(table: &ReportTable) -> Table {
    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut col = 0;
            let cells = row
                .iter()
                .map(|cell| {
                    let width = spanned_width(&table.column_widths, col, cell.col_span);
                    col += cell.col_span;
                    build_cell(cell, width)
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    Table::new(rows).set_grid(table.column_widths.clone())
}

/// Total width of `span` grid columns starting at `start`; columns past the
/// grid contribute nothing
fn spanned_width(widths: &[usize], start: usize, span: usize) -> usize {
    let end = start.saturating_add(span).min(widths.len());
    widths.get(start.min(end)..end).map_or(0, |w| w.iter().sum())
}

fn build_cell(cell: &Cell, width: usize) -> TableCell {
    let mut run = Run::new().add_text(&cell.text);
    if cell.bold {
        run = run.bold();
    }

    let mut paragraph = Paragraph::new();
    match &cell.advisory {
        Some(note) => {
            paragraph = paragraph
                .add_run(run.bold().color(ADVISORY_COLOR))
                .add_run(
                    Run::new()
                        .add_text(format!(" ⚠ {}", note))
                        .italic()
                        .size(18)
                        .color(ADVISORY_COLOR),
                );
        }
        None => paragraph = paragraph.add_run(run),
    }

    let mut table_cell = TableCell::new()
        .add_paragraph(paragraph)
        .width(width, WidthType::Dxa);
    if cell.col_span > 1 {
        table_cell = table_cell.grid_span(cell.col_span);
    }
    table_cell
}
