//! Field schema registry - the fixed set of inspection fields per section
//!
//! This table is the single description of the check sheet. The wizard, the
//! record template, the validator and the report assembler all read it, so
//! the form and the printed report cannot drift apart.

use miette::Diagnostic;
use serde::Serialize;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use thiserror::Error;

/// The two accepted values of a tri-state item
pub const TRI_STATE: [&str; 2] = ["OK", "Not OK"];

/// Filter colour indicator states
pub const FILTER_COLORS: [&str; 3] = ["Green (OK)", "Yellow (Dirty)", "Red (Bypass)"];

/// Schema lookup errors - a record and the registry disagree
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unknown section: {section}")]
    #[diagnostic(
        code(checksheet::schema::unknown_section),
        help("valid sections: safety, operating, reservoir, hydraulic_drive, hydraulic_pump")
    )]
    UnknownSection { section: String },

    #[error("Unknown field '{field}' in section '{section}'")]
    #[diagnostic(
        code(checksheet::schema::unknown_field),
        help("run `checksheet schema <section>` to list the fields of a section")
    )]
    UnknownField { section: String, field: String },
}

/// Sections of the check sheet, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Safety,
    Operating,
    Reservoir,
    HydraulicDrive,
    HydraulicPump,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Safety,
        SectionId::Operating,
        SectionId::Reservoir,
        SectionId::HydraulicDrive,
        SectionId::HydraulicPump,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Safety => "safety",
            SectionId::Operating => "operating",
            SectionId::Reservoir => "reservoir",
            SectionId::HydraulicDrive => "hydraulic_drive",
            SectionId::HydraulicPump => "hydraulic_pump",
        }
    }

    /// Heading used on the form and the report
    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Safety => "Safety",
            SectionId::Operating => "General Rake Operating Condition",
            SectionId::Reservoir => "Reservoir",
            SectionId::HydraulicDrive => "Hydraulic Drive Unit",
            SectionId::HydraulicPump => "Hydraulic Oil Supply Pump",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            SectionId::Safety => SAFETY,
            SectionId::Operating => OPERATING,
            SectionId::Reservoir => RESERVOIR,
            SectionId::HydraulicDrive => HYDRAULIC_DRIVE,
            SectionId::HydraulicPump => HYDRAULIC_PUMP,
        }
    }

    pub fn layout(&self) -> SectionLayout {
        match self {
            SectionId::Safety | SectionId::HydraulicDrive | SectionId::HydraulicPump => {
                SectionLayout::Checklist
            }
            SectionId::Operating => SectionLayout::Measurement,
            SectionId::Reservoir => SectionLayout::Paired(RESERVOIR_PAIRS),
        }
    }

    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.key == key)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SectionId {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownSection {
                section: s.to_string(),
            })
    }
}

/// How a section is laid out as a report table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLayout {
    /// Item / status rows with a trailing comments row
    Checklist,
    /// Parameter / reading rows
    Measurement,
    /// Four-column rows pairing a left field with an unrelated right field
    Paired(&'static [(&'static str, &'static str)]),
}

/// Inclusive or exclusive numeric bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidRange {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
}

impl ValidRange {
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            lower: Bound::Included(min),
            upper: Bound::Included(max),
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self {
            lower: Bound::Included(min),
            upper: Bound::Unbounded,
        }
    }

    pub const fn below(max: f64) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Excluded(max),
        }
    }
}

impl RangeBounds<f64> for ValidRange {
    fn start_bound(&self) -> Bound<&f64> {
        self.lower.as_ref()
    }

    fn end_bound(&self) -> Bound<&f64> {
        self.upper.as_ref()
    }
}

impl fmt::Display for ValidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            (Bound::Included(a), Bound::Included(b)) => write!(f, "{}-{}", a, b),
            (Bound::Unbounded, Bound::Excluded(b)) => write!(f, "< {}", b),
            (Bound::Unbounded, Bound::Included(b)) => write!(f, "<= {}", b),
            (Bound::Included(a), Bound::Unbounded) => write!(f, ">= {}", a),
            (Bound::Excluded(a), Bound::Unbounded) => write!(f, "> {}", a),
            (lower, upper) => {
                match lower {
                    Bound::Included(a) => write!(f, "[{}", a)?,
                    Bound::Excluded(a) => write!(f, "({}", a)?,
                    Bound::Unbounded => write!(f, "(-inf")?,
                }
                match upper {
                    Bound::Included(b) => write!(f, ", {}]", b),
                    Bound::Excluded(b) => write!(f, ", {})", b),
                    Bound::Unbounded => write!(f, ", inf)"),
                }
            }
        }
    }
}

/// What a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueKind {
    /// Free text (comments)
    Text,
    /// Number with hard input limits and an optional advisory target
    Numeric {
        unit: &'static str,
        input: ValidRange,
        target: Option<ValidRange>,
    },
    /// Exactly "OK" or "Not OK"
    TriState,
    /// One of a fixed list
    Choice { options: &'static [&'static str] },
}

impl ValueKind {
    /// The values a choice-style field offers, if any
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self {
            ValueKind::TriState => Some(&TRI_STATE[..]),
            ValueKind::Choice { options } => Some(*options),
            _ => None,
        }
    }
}

/// Static description of one inspection field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub section: SectionId,
    pub kind: ValueKind,
}

impl FieldSpec {
    /// Label with the unit appended for numeric fields
    pub fn display_label(&self) -> String {
        match self.kind {
            ValueKind::Numeric { unit, .. } => format!("{} ({})", self.label, unit),
            _ => self.label.to_string(),
        }
    }

    pub fn is_comments(&self) -> bool {
        matches!(self.kind, ValueKind::Text) && self.key == "comments"
    }

    /// Advisory note for a numeric value outside the target range
    ///
    /// Values that are blank or not numbers carry no advisory here; the
    /// value is never altered or rejected.
    pub fn advisory_for(&self, value: &crate::core::FieldValue) -> Option<String> {
        let ValueKind::Numeric {
            unit,
            target: Some(target),
            ..
        } = self.kind
        else {
            return None;
        };
        let number = value.as_f64()?;
        if target.contains(&number) {
            None
        } else {
            Some(format!("outside target range ({} {})", target, unit))
        }
    }

    /// Parse operator input into a value this field accepts
    ///
    /// Used by the interactive collector; numeric input must parse and stay
    /// within the field's input limits, choice input must be one of the
    /// options. Target ranges are advisory and not checked here.
    pub fn parse_input(&self, input: &str) -> Result<crate::core::FieldValue, String> {
        let input = input.trim();
        match self.kind {
            ValueKind::Text => Ok(input.into()),
            ValueKind::Numeric { unit, input: limits, .. } => {
                let number: f64 = input
                    .parse()
                    .map_err(|_| format!("'{}' is not a number", input))?;
                if !limits.contains(&number) {
                    return Err(format!("{} must be within {} {}", self.label, limits, unit));
                }
                Ok(number.into())
            }
            ValueKind::TriState | ValueKind::Choice { .. } => {
                let options = self.kind.options().unwrap_or_default();
                options
                    .iter()
                    .find(|o| o.eq_ignore_ascii_case(input))
                    .map(|o| (*o).into())
                    .ok_or_else(|| format!("expected one of: {}", options.join(", ")))
            }
        }
    }

    /// Value a blank record template starts with
    pub fn initial_value(&self) -> crate::core::FieldValue {
        match self.kind {
            ValueKind::Text => "".into(),
            ValueKind::Numeric { .. } => 0.0.into(),
            ValueKind::TriState | ValueKind::Choice { .. } => self
                .kind
                .options()
                .and_then(|o| o.first())
                .copied()
                .unwrap_or_default()
                .into(),
        }
    }
}

/// Registry over the static field table
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    pub fn new() -> Self {
        Self
    }

    /// All sections in report order
    pub fn sections(&self) -> &'static [SectionId] {
        &SectionId::ALL
    }

    pub fn section(&self, name: &str) -> Result<SectionId, SchemaError> {
        name.parse()
    }

    /// Ordered field specs of a section
    pub fn fields_for(&self, section: &str) -> Result<&'static [FieldSpec], SchemaError> {
        Ok(self.section(section)?.fields())
    }

    pub fn field(&self, section: &str, key: &str) -> Result<&'static FieldSpec, SchemaError> {
        self.section(section)?
            .field(key)
            .ok_or_else(|| SchemaError::UnknownField {
                section: section.to_string(),
                field: key.to_string(),
            })
    }

    /// Every field of every section
    pub fn all_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        SectionId::ALL.into_iter().flat_map(|s| s.fields().iter())
    }
}

const fn tri(section: SectionId, key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        section,
        kind: ValueKind::TriState,
    }
}

const fn comments(section: SectionId) -> FieldSpec {
    FieldSpec {
        key: "comments",
        label: "Comments",
        section,
        kind: ValueKind::Text,
    }
}

const fn temperature(section: SectionId, key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        section,
        kind: ValueKind::Numeric {
            unit: "°C",
            input: ValidRange::between(-50.0, 200.0),
            target: None,
        },
    }
}

const fn pressure(
    key: &'static str,
    label: &'static str,
    max: f64,
    target: Option<ValidRange>,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        section: SectionId::Operating,
        kind: ValueKind::Numeric {
            unit: "MPa",
            input: ValidRange::between(0.0, max),
            target,
        },
    }
}

static SAFETY: &[FieldSpec] = &[
    tri(SectionId::Safety, "equipment_tags", "Equipment Tags"),
    tri(SectionId::Safety, "handrail_grating", "Hand Rail/Grating"),
    tri(SectionId::Safety, "housekeeping", "Housekeeping - Cleaning"),
    tri(SectionId::Safety, "terminal_grounding", "Terminal Box/Grounding Cables"),
    comments(SectionId::Safety),
];

static OPERATING: &[FieldSpec] = &[
    pressure("drive_oil_pressure", "Drive Hydraulic Supply Oil Pressure", 50.0, None),
    pressure("rake_torque_pressure", "Rake Torque Pressure", 50.0, None),
    pressure(
        "rake_lift_pressure",
        "Rake Lift Pressure",
        15.0,
        Some(ValidRange::between(9.0, 10.0)),
    ),
];

static RESERVOIR: &[FieldSpec] = &[
    temperature(SectionId::Reservoir, "prv1_temp", "PRV 1 Temperature"),
    temperature(SectionId::Reservoir, "prv2_temp", "PRV 2 Temperature"),
    temperature(SectionId::Reservoir, "prv3_temp", "PRV 3 Temperature"),
    FieldSpec {
        key: "delta_pressure",
        label: "Delta Pressure Across Filter",
        section: SectionId::Reservoir,
        kind: ValueKind::Numeric {
            unit: "kPa",
            input: ValidRange::at_least(0.0),
            target: Some(ValidRange::below(300.0)),
        },
    },
    tri(SectionId::Reservoir, "oil_leaks", "Check hydraulic oil reservoir for oil leaks"),
    tri(
        SectionId::Reservoir,
        "condensate",
        "Check hydraulic oil reservoir for condensate built up",
    ),
    tri(
        SectionId::Reservoir,
        "contamination",
        "Check hydraulic oil for contamination (dirty/milky)",
    ),
    tri(
        SectionId::Reservoir,
        "panel_fittings",
        "Check instrument and fittings on panel for oil leaks",
    ),
    tri(SectionId::Reservoir, "breather_condition", "Check reservoir breather condition"),
    FieldSpec {
        key: "filter_color",
        label: "Filter Color Indicator",
        section: SectionId::Reservoir,
        kind: ValueKind::Choice {
            options: &FILTER_COLORS,
        },
    },
    comments(SectionId::Reservoir),
];

/// Reservoir rows: inspection item on the left, reading on the right
static RESERVOIR_PAIRS: &[(&str, &str)] = &[
    ("oil_leaks", "prv1_temp"),
    ("condensate", "prv2_temp"),
    ("contamination", "prv3_temp"),
    ("panel_fittings", "delta_pressure"),
    ("breather_condition", "filter_color"),
];

static HYDRAULIC_DRIVE: &[FieldSpec] = &[
    temperature(SectionId::HydraulicDrive, "nde_temp", "NDE Temperature"),
    temperature(SectionId::HydraulicDrive, "motor_body_temp", "Motor Body Temperature"),
    tri(SectionId::HydraulicDrive, "general_condition", "General condition & Noise"),
    tri(
        SectionId::HydraulicDrive,
        "hold_down_bolts",
        "Hold down bolts and Foundation base plate",
    ),
    tri(
        SectionId::HydraulicDrive,
        "cooling_lube",
        "Cooling system and Lube fitting integrity",
    ),
    comments(SectionId::HydraulicDrive),
];

static HYDRAULIC_PUMP: &[FieldSpec] = &[
    temperature(SectionId::HydraulicPump, "pump_temp", "Pump Temperature"),
    tri(SectionId::HydraulicPump, "general_condition", "General condition & Noise"),
    tri(
        SectionId::HydraulicPump,
        "pedestal_bolts",
        "Pedestal hold down bolts and Foundation base plate",
    ),
    tri(
        SectionId::HydraulicPump,
        "casing_fittings",
        "Pump casing & Suction/discharge line fittings",
    ),
    tri(
        SectionId::HydraulicPump,
        "flexible_hoses",
        "Check Flexible hose supply lines for chafe and cracks",
    ),
    comments(SectionId::HydraulicPump),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValue;
    use std::collections::HashSet;

    #[test]
    fn test_fields_for_known_section() {
        let registry = SchemaRegistry::new();
        let safety = registry.fields_for("safety").unwrap();
        let keys: Vec<_> = safety.iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec![
                "equipment_tags",
                "handrail_grating",
                "housekeeping",
                "terminal_grounding",
                "comments"
            ]
        );
    }

    #[test]
    fn test_fields_for_unknown_section() {
        let err = SchemaRegistry::new().fields_for("gearbox").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownSection {
                section: "gearbox".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_field() {
        let err = SchemaRegistry::new()
            .field("operating", "oil_level")
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownField { .. }));
    }

    #[test]
    fn test_keys_unique_and_sections_consistent() {
        for section in SectionId::ALL {
            let mut seen = HashSet::new();
            for field in section.fields() {
                assert!(seen.insert(field.key), "duplicate key {}", field.key);
                assert_eq!(field.section, section);
            }
        }
    }

    #[test]
    fn test_tri_state_and_filter_options() {
        let registry = SchemaRegistry::new();
        let tags = registry.field("safety", "equipment_tags").unwrap();
        assert_eq!(tags.kind.options(), Some(&["OK", "Not OK"][..]));

        let filter = registry.field("reservoir", "filter_color").unwrap();
        assert_eq!(filter.kind.options().map(|o| o.len()), Some(3));
    }

    #[test]
    fn test_paired_layout_covers_reservoir() {
        let SectionLayout::Paired(pairs) = SectionId::Reservoir.layout() else {
            panic!("reservoir should use the paired layout");
        };
        let mut covered: Vec<&str> = pairs.iter().flat_map(|(l, r)| [*l, *r]).collect();
        covered.sort_unstable();
        let mut expected: Vec<&str> = SectionId::Reservoir
            .fields()
            .iter()
            .filter(|f| !f.is_comments())
            .map(|f| f.key)
            .collect();
        expected.sort_unstable();
        assert_eq!(covered, expected);
    }

    #[test]
    fn test_lift_pressure_advisory() {
        let lift = SchemaRegistry::new()
            .field("operating", "rake_lift_pressure")
            .unwrap();
        assert!(lift.advisory_for(&FieldValue::Number(9.0)).is_none());
        assert!(lift.advisory_for(&FieldValue::Number(10.0)).is_none());
        let note = lift.advisory_for(&FieldValue::Number(11.5)).unwrap();
        assert!(note.contains("9-10 MPa"));
        assert!(lift.advisory_for(&FieldValue::from("")).is_none());
    }

    #[test]
    fn test_delta_pressure_upper_bound_is_exclusive() {
        let delta = SchemaRegistry::new()
            .field("reservoir", "delta_pressure")
            .unwrap();
        assert!(delta.advisory_for(&FieldValue::Number(299.0)).is_none());
        let note = delta.advisory_for(&FieldValue::Number(300.0)).unwrap();
        assert!(note.contains("< 300 kPa"));
    }

    #[test]
    fn test_parse_input() {
        let registry = SchemaRegistry::new();
        let lift = registry.field("operating", "rake_lift_pressure").unwrap();
        assert_eq!(lift.parse_input("9.5"), Ok(FieldValue::Number(9.5)));
        // Above target but within input limits is accepted
        assert_eq!(lift.parse_input("11.5"), Ok(FieldValue::Number(11.5)));
        assert!(lift.parse_input("16").is_err());
        assert!(lift.parse_input("high").is_err());

        let tags = registry.field("safety", "equipment_tags").unwrap();
        assert_eq!(tags.parse_input("not ok"), Ok(FieldValue::from("Not OK")));
        assert!(tags.parse_input("maybe").is_err());
    }

    #[test]
    fn test_display_label_has_unit() {
        let registry = SchemaRegistry::new();
        assert_eq!(
            registry
                .field("operating", "rake_lift_pressure")
                .unwrap()
                .display_label(),
            "Rake Lift Pressure (MPa)"
        );
        assert_eq!(
            registry
                .field("safety", "housekeeping")
                .unwrap()
                .display_label(),
            "Housekeeping - Cleaning"
        );
    }
}
