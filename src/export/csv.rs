//! CSV tabular sink

use std::io::Write;

use super::{SinkError, CSV_MIME};
use crate::report::flatten::FlatRecord;

/// Accumulates flattened records and writes them as one CSV table
///
/// The header row is the union of all keys in first-seen order; a record
/// without a column gets an empty cell.
#[derive(Debug, Default, Clone)]
pub struct CsvSink {
    rows: Vec<FlatRecord>,
}

impl CsvSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extension(&self) -> &'static str {
        "csv"
    }

    pub fn mime_type(&self) -> &'static str {
        CSV_MIME
    }

    pub fn push(&mut self, row: FlatRecord) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names across every accumulated row
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if !columns.contains(&key) {
                    columns.push(key);
                }
            }
        }
        columns
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), SinkError> {
        let columns = self.columns();
        let mut csv = ::csv::Writer::from_writer(writer);
        csv.write_record(&columns)?;
        for row in &self.rows {
            csv.write_record(columns.iter().map(|c| row.value(c)))?;
        }
        csv.flush()?;
        tracing::debug!(rows = self.rows.len(), columns = columns.len(), "wrote csv");
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SinkError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{InspectionHeader, InspectionRecord};
    use crate::report::flatten;
    use chrono::NaiveDate;

    fn record(technician: &str) -> InspectionRecord {
        InspectionRecord::new(InspectionHeader::new(
            technician,
            "Group A",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        ))
    }

    #[test]
    fn test_single_row() {
        let mut sink = CsvSink::new();
        sink.push(flatten(
            &record("Rodin")
                .with_field("safety", "equipment_tags", "OK")
                .with_field("safety", "comments", "loose grating, north side"),
        ));
        let text = String::from_utf8(sink.to_bytes().unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Date,Technician,Group,Equipment_Tag,WO_Number,Inspection_Type,Visual_Check,Vibration_Check,safety_equipment_tags,safety_comments"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-15,Rodin,Group A,,,Thickener I Rake Drive Hydraulic Power Pack,True,True,OK,\"loose grating, north side\""
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_rows_share_union_header() {
        let mut sink = CsvSink::new();
        sink.push(flatten(&record("Rodin").with_field("operating", "rake_lift_pressure", 9.5)));
        sink.push(flatten(&record("Hery").with_field("reservoir", "prv1_temp", 44.0)));
        assert_eq!(sink.len(), 2);

        let columns = sink.columns();
        assert_eq!(columns.len(), 10);
        assert_eq!(columns[8], "operating_rake_lift_pressure");
        assert_eq!(columns[9], "reservoir_prv1_temp");

        let bytes = sink.to_bytes().unwrap();
        let mut reader = ::csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<::csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][8], "9.5");
        assert_eq!(&rows[0][9], "");
        assert_eq!(&rows[1][8], "");
        assert_eq!(&rows[1][9], "44");
    }
}
