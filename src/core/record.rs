//! Inspection record - the values entered for one equipment check

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::ordered::OrderedMap;

/// A single recorded value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, accepting numbers typed as text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for blank text, which counts as "not recorded"
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Field key to value, in entry order
pub type SectionData = OrderedMap<FieldValue>;

/// Equipment being inspected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InspectionType {
    #[default]
    ThickenerI,
    ThickenerIi,
}

impl InspectionType {
    pub const ALL: [InspectionType; 2] = [InspectionType::ThickenerI, InspectionType::ThickenerIi];

    /// Identifier used in record files
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionType::ThickenerI => "thickener_i",
            InspectionType::ThickenerIi => "thickener_ii",
        }
    }

    /// Label shown on the report and in exports
    pub fn label(&self) -> &'static str {
        match self {
            InspectionType::ThickenerI => "Thickener I Rake Drive Hydraulic Power Pack",
            InspectionType::ThickenerIi => "Thickener II Rake Drive Hydraulic Power Pack",
        }
    }
}

impl std::fmt::Display for InspectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for InspectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "thickener_i" | "i" | "1" => Ok(InspectionType::ThickenerI),
            "thickener_ii" | "ii" | "2" => Ok(InspectionType::ThickenerIi),
            _ => Err(format!(
                "Invalid inspection type: {}. Use thickener_i or thickener_ii",
                s
            )),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Who inspected what, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionHeader {
    /// Technician name (required)
    #[serde(default)]
    pub technician_name: String,

    /// Crew or shift group (required)
    #[serde(default)]
    pub group: String,

    pub inspection_date: NaiveDate,

    /// Equipment tag number, e.g. "31-TM-01"
    #[serde(default)]
    pub equipment_tag: String,

    /// Work order number
    #[serde(default)]
    pub wo_number: String,

    #[serde(default)]
    pub inspection_type: InspectionType,

    #[serde(default = "default_true")]
    pub visual_check: bool,

    #[serde(default = "default_true")]
    pub vibration_check: bool,
}

impl InspectionHeader {
    pub fn new(
        technician_name: impl Into<String>,
        group: impl Into<String>,
        inspection_date: NaiveDate,
    ) -> Self {
        Self {
            technician_name: technician_name.into(),
            group: group.into(),
            inspection_date,
            equipment_tag: String::new(),
            wo_number: String::new(),
            inspection_type: InspectionType::default(),
            visual_check: true,
            vibration_check: true,
        }
    }

    pub fn with_equipment_tag(mut self, tag: impl Into<String>) -> Self {
        self.equipment_tag = tag.into();
        self
    }

    pub fn with_wo_number(mut self, wo: impl Into<String>) -> Self {
        self.wo_number = wo.into();
        self
    }

    pub fn with_inspection_type(mut self, inspection_type: InspectionType) -> Self {
        self.inspection_type = inspection_type;
        self
    }

    /// Names of required header fields that are empty
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.technician_name.trim().is_empty() {
            missing.push("technician_name");
        }
        if self.group.trim().is_empty() {
            missing.push("group");
        }
        missing
    }
}

/// Full set of values entered for one equipment check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub header: InspectionHeader,

    /// Section name to field values
    #[serde(default)]
    pub sections: OrderedMap<SectionData>,
}

impl InspectionRecord {
    pub fn new(header: InspectionHeader) -> Self {
        Self {
            header,
            sections: OrderedMap::new(),
        }
    }

    /// Set a field value, creating the section if needed
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<FieldValue>) {
        self.sections
            .entry_or_default(section)
            .insert(key, value.into());
    }

    pub fn with_field(mut self, section: &str, key: &str, value: impl Into<FieldValue>) -> Self {
        self.set(section, key, value);
        self
    }

    pub fn field(&self, section: &str, key: &str) -> Option<&FieldValue> {
        self.sections.get(section).and_then(|data| data.get(key))
    }

    /// Display text for a field; absent fields read as empty
    pub fn display_value(&self, section: &str, key: &str) -> String {
        self.field(section, key)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_missing_required() {
        let header = InspectionHeader::new("Rodin", "", date());
        assert_eq!(header.missing_required(), vec!["group"]);

        let header = InspectionHeader::new("  ", "", date());
        assert_eq!(header.missing_required(), vec!["technician_name", "group"]);

        assert!(InspectionHeader::new("Rodin", "Group A", date())
            .missing_required()
            .is_empty());
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Number(11.5).to_string(), "11.5");
        assert_eq!(FieldValue::Number(300.0).to_string(), "300");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::from("Not OK").to_string(), "Not OK");
    }

    #[test]
    fn test_field_value_as_f64() {
        assert_eq!(FieldValue::from(" 9.5 ").as_f64(), Some(9.5));
        assert_eq!(FieldValue::from("OK").as_f64(), None);
        assert_eq!(FieldValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_display_value_defaults_to_empty() {
        let record = InspectionRecord::new(InspectionHeader::new("Rodin", "Group A", date()))
            .with_field("safety", "equipment_tags", "OK");
        assert_eq!(record.display_value("safety", "equipment_tags"), "OK");
        assert_eq!(record.display_value("safety", "housekeeping"), "");
        assert_eq!(record.display_value("reservoir", "prv1_temp"), "");
    }

    #[test]
    fn test_record_from_yaml() {
        let yaml = r#"
header:
  technician_name: Rodin
  group: Group A
  inspection_date: 2024-03-15
  equipment_tag: 31-TM-01
  inspection_type: thickener_ii
sections:
  safety:
    equipment_tags: OK
    comments: ""
  operating:
    rake_lift_pressure: 11.5
    drive_oil_pressure: 12
"#;
        let record: InspectionRecord = serde_yml::from_str(yaml).unwrap();
        assert_eq!(record.header.inspection_date, date());
        assert_eq!(record.header.inspection_type, InspectionType::ThickenerIi);
        assert!(record.header.visual_check);
        assert_eq!(record.header.wo_number, "");
        assert_eq!(
            record.field("operating", "rake_lift_pressure"),
            Some(&FieldValue::Number(11.5))
        );
        assert_eq!(
            record.field("operating", "drive_oil_pressure"),
            Some(&FieldValue::Number(12.0))
        );
        assert_eq!(
            record.sections.keys().collect::<Vec<_>>(),
            vec!["safety", "operating"]
        );
    }

    #[test]
    fn test_inspection_type_parse() {
        assert_eq!(
            "thickener-ii".parse::<InspectionType>().unwrap(),
            InspectionType::ThickenerIi
        );
        assert!("press".parse::<InspectionType>().is_err());
    }
}
