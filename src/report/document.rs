//! Report document tree - sections, tables, rows and cells
//!
//! A `ReportDocument` is rendering-ready: sinks walk it without knowing
//! anything about inspections.

use serde::Serialize;

/// One table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    /// Number of grid columns this cell covers
    pub col_span: usize,

    /// Note for a value outside its target range; the text stays verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            col_span: 1,
            advisory: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::text(text)
        }
    }

    pub fn spanning(mut self, columns: usize) -> Self {
        self.col_span = columns.max(1);
        self
    }

    pub fn with_advisory(mut self, advisory: Option<String>) -> Self {
        self.advisory = advisory;
        self
    }

    pub fn is_flagged(&self) -> bool {
        self.advisory.is_some()
    }
}

/// Fixed table templates; each carries its own presentation hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Inspection details, label/value pairs side by side
    Header,
    /// Item / status
    Checklist,
    /// Parameter / reading
    Measurement,
    /// Item / status next to an unrelated reading
    Paired,
}

impl TableKind {
    pub fn columns(&self) -> usize {
        match self {
            TableKind::Header | TableKind::Paired => 4,
            TableKind::Checklist | TableKind::Measurement => 2,
        }
    }

    /// Column widths in twentieths of a point (an A4 text block is ~9000)
    pub fn column_widths(&self) -> &'static [usize] {
        match self {
            TableKind::Header => &[2000, 2500, 2000, 2500],
            TableKind::Checklist => &[5000, 4000],
            TableKind::Measurement => &[5500, 3500],
            TableKind::Paired => &[3400, 1100, 3000, 1500],
        }
    }

    /// Column captions used by sinks that need a header row
    pub fn captions(&self) -> &'static [&'static str] {
        match self {
            TableKind::Header => &["Detail", "Value", "Detail", "Value"],
            TableKind::Checklist => &["Item", "Status"],
            TableKind::Measurement => &["Parameter", "Value"],
            TableKind::Paired => &["Inspection Item", "Status", "Reading", "Value"],
        }
    }
}

/// A rectangular grid of cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub kind: TableKind,
    pub column_widths: Vec<usize>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            column_widths: kind.column_widths().to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.kind.columns()
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(
            row.iter().map(|c| c.col_span).sum::<usize>(),
            self.columns(),
            "row does not fill the table"
        );
        self.rows.push(row);
    }

    /// Append a single cell spanning every column
    pub fn push_full_width(&mut self, cell: Cell) {
        let columns = self.columns();
        self.rows.push(vec![cell.spanning(columns)]);
    }

    /// All cells in row order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }
}

/// One titled part of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    /// Registry name of the section; `None` for the details block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub title: String,
    pub tables: Vec<ReportTable>,
}

/// Font hint for sinks that lay out text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontHint {
    pub family: String,
    /// Size in half-points
    pub size: usize,
}

impl Default for FontHint {
    fn default() -> Self {
        Self {
            family: "Calibri".to_string(),
            size: 22,
        }
    }
}

/// The printable report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    /// Running page-header text
    pub header_text: String,
    pub title: String,
    pub font: FontHint,
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    pub fn section(&self, key: &str) -> Option<&ReportSection> {
        self.sections
            .iter()
            .find(|s| s.key.as_deref() == Some(key))
    }

    /// Cells carrying an advisory note
    pub fn flagged_cells(&self) -> impl Iterator<Item = &Cell> {
        self.sections
            .iter()
            .flat_map(|s| s.tables.iter())
            .flat_map(|t| t.cells())
            .filter(|c| c.is_flagged())
    }
}
