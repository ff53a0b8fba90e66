//! Report assembly - the record-to-document and record-to-row transformations

pub mod assembler;
pub mod document;
pub mod flatten;

pub use assembler::{assemble, ReportAssembler, ReportError};
pub use document::{Cell, FontHint, ReportDocument, ReportSection, ReportTable, TableKind};
pub use flatten::{flatten, FlatRecord, HEADER_COLUMNS};
