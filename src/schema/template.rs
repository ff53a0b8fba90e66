//! Blank record templates for hand-filled inspections

use chrono::{DateTime, NaiveDate, Utc};
use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

use crate::core::record::InspectionType;
use crate::schema::registry::{SchemaRegistry, ValueKind};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const RECORD_TEMPLATE: &str = "record.yaml.tera";

/// Header values pre-filled into a new record
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub title: String,
    pub technician: String,
    pub group: String,
    pub date: NaiveDate,
    pub equipment_tag: String,
    pub wo_number: String,
    pub inspection_type: InspectionType,
    pub created: DateTime<Utc>,
}

impl TemplateContext {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            technician: String::new(),
            group: String::new(),
            date,
            equipment_tag: String::new(),
            wo_number: String::new(),
            inspection_type: InspectionType::default(),
            created: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_technician(mut self, technician: impl Into<String>) -> Self {
        self.technician = technician.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
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
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

#[derive(Serialize)]
struct FieldRow {
    key: &'static str,
    value: String,
    label: String,
    hint: String,
}

#[derive(Serialize)]
struct SectionBlock {
    key: &'static str,
    title: &'static str,
    fields: Vec<FieldRow>,
}

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
    registry: SchemaRegistry,
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self {
            tera,
            registry: SchemaRegistry::new(),
        })
    }

    /// Render a blank record with every field of every section
    pub fn generate_record(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|n| n == RECORD_TEMPLATE) {
            return Err(TemplateError::NotFound(RECORD_TEMPLATE.to_string()));
        }

        let mut context = tera::Context::new();
        context.insert("title", &ctx.title);
        context.insert("created", &ctx.created.format("%Y-%m-%d %H:%M UTC").to_string());
        context.insert("technician", &yaml_scalar(&ctx.technician));
        context.insert("group", &yaml_scalar(&ctx.group));
        context.insert("date", &yaml_scalar(&ctx.date.format("%Y-%m-%d").to_string()));
        context.insert("equipment_tag", &yaml_scalar(&ctx.equipment_tag));
        context.insert("wo_number", &yaml_scalar(&ctx.wo_number));
        context.insert("inspection_type", &yaml_scalar(ctx.inspection_type.as_str()));
        context.insert("sections", &self.section_blocks());

        let mut rendered = self
            .tera
            .render(RECORD_TEMPLATE, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))?;
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }

    fn section_blocks(&self) -> Vec<SectionBlock> {
        self.registry
            .sections()
            .iter()
            .map(|section| SectionBlock {
                key: section.as_str(),
                title: section.title(),
                fields: section
                    .fields()
                    .iter()
                    .map(|spec| FieldRow {
                        key: spec.key,
                        value: match spec.initial_value() {
                            crate::core::FieldValue::Text(s) => yaml_scalar(&s),
                            other => other.to_string(),
                        },
                        label: spec.display_label(),
                        hint: hint_for(&spec.kind),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Quote a string so it survives as a YAML scalar
fn yaml_scalar(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

fn hint_for(kind: &ValueKind) -> String {
    match kind {
        ValueKind::Text => String::new(),
        ValueKind::Numeric { target, .. } => target
            .map(|t| format!("target {}", t))
            .unwrap_or_default(),
        ValueKind::TriState | ValueKind::Choice { .. } => {
            kind.options().unwrap_or_default().join(" | ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::InspectionRecord;

    fn context() -> TemplateContext {
        TemplateContext::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
            .with_title("Thickener Hydraulic Power Pack CM Check Sheet")
            .with_technician("Rodin")
            .with_group("Group A")
            .with_equipment_tag("31 - TM -")
    }

    #[test]
    fn test_template_parses_back_into_record() {
        let generator = TemplateGenerator::new().unwrap();
        let yaml = generator.generate_record(&context()).unwrap();
        let record: InspectionRecord = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(record.header.technician_name, "Rodin");
        assert_eq!(record.header.equipment_tag, "31 - TM -");
        assert_eq!(record.sections.len(), 5);
        for section in SchemaRegistry::new().sections() {
            let data = record.sections.get(section.as_str()).unwrap();
            assert_eq!(data.len(), section.fields().len());
        }
        assert_eq!(record.display_value("safety", "equipment_tags"), "OK");
        assert_eq!(record.display_value("reservoir", "filter_color"), "Green (OK)");
        assert_eq!(record.display_value("operating", "rake_lift_pressure"), "0");
        assert_eq!(record.display_value("safety", "comments"), "");
    }

    #[test]
    fn test_template_lists_hints() {
        let yaml = TemplateGenerator::new()
            .unwrap()
            .generate_record(&context())
            .unwrap();
        assert!(yaml.contains("# Rake Lift Pressure (MPa) [target 9-10]"));
        assert!(yaml.contains("[Green (OK) | Yellow (Dirty) | Red (Bypass)]"));
        assert!(yaml.starts_with("# Thickener Hydraulic Power Pack CM Check Sheet"));
    }
}
