//! Flattener - InspectionRecord to a single tabular row

use serde::Serialize;

use crate::core::ordered::OrderedMap;
use crate::core::record::InspectionRecord;

/// Fixed column names for the header fields, in export order
pub const HEADER_COLUMNS: [&str; 8] = [
    "Date",
    "Technician",
    "Group",
    "Equipment_Tag",
    "WO_Number",
    "Inspection_Type",
    "Visual_Check",
    "Vibration_Check",
];

/// One flattened inspection, column name to cell text
///
/// Keys keep insertion order for display only; lookups never depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatRecord {
    values: OrderedMap<String>,
}

impl FlatRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Cell text for `key`; absent columns read as empty
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }
}

/// Flatten a record into one export row
///
/// Header fields map to `HEADER_COLUMNS`; every section field present in
/// the record maps to `"{section}_{key}"`. This never fails: the flattener
/// exports whatever the record holds without consulting the field schema.
pub fn flatten(record: &InspectionRecord) -> FlatRecord {
    let header = &record.header;
    let mut flat = FlatRecord::default();

    let [date, technician, group, tag, wo, kind, visual, vibration] = HEADER_COLUMNS;
    flat.insert(date, header.inspection_date.format("%Y-%m-%d").to_string());
    flat.insert(technician, header.technician_name.as_str());
    flat.insert(group, header.group.as_str());
    flat.insert(tag, header.equipment_tag.as_str());
    flat.insert(wo, header.wo_number.as_str());
    flat.insert(kind, header.inspection_type.label());
    flat.insert(visual, check_cell(header.visual_check));
    flat.insert(vibration, check_cell(header.vibration_check));

    for (section, data) in record.sections.iter() {
        for (key, value) in data.iter() {
            let column = format!("{}_{}", section, key);
            // Header columns are fixed; a section entry never replaces one
            if HEADER_COLUMNS.contains(&column.as_str()) {
                tracing::warn!(column = %column, "section field collides with a header column, skipped");
                continue;
            }
            flat.insert(column, value.to_string());
        }
    }

    tracing::debug!(columns = flat.len(), "flattened record");
    flat
}

/// Check flags are written `True`/`False`, the spelling existing data sheets use
fn check_cell(checked: bool) -> &'static str {
    if checked {
        "True"
    } else {
        "False"
    }
}
