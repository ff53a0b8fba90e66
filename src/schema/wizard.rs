//! Schema-driven interactive collector
//!
//! Walks the field registry section by section and prompts for every field,
//! the same fields the report prints. Produces an `InspectionRecord`.
//! Everything the wizard prints goes to stderr alongside the prompts, so
//! stdout carries only the finished record.

use chrono::{Local, NaiveDate};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::config::Config;
use crate::core::record::{FieldValue, InspectionHeader, InspectionRecord, InspectionType};
use crate::schema::registry::{FieldSpec, SchemaRegistry, SectionId, ValueKind};
use crate::schema::validator::Validator;

/// Interactive inspection wizard
pub struct SchemaWizard {
    registry: SchemaRegistry,
    theme: ColorfulTheme,
    defaults: Config,
}

impl SchemaWizard {
    pub fn new(defaults: Config) -> Self {
        Self {
            registry: SchemaRegistry::new(),
            theme: ColorfulTheme::default(),
            defaults,
        }
    }

    /// Run the wizard: header, then every section in report order
    pub fn run(&self) -> Result<InspectionRecord> {
        eprintln!();
        eprintln!(
            "{} {}",
            style("◆").cyan(),
            style("Hydraulic Power Pack Inspection").bold()
        );
        eprintln!("{}", style("─".repeat(50)).dim());

        let header = self.prompt_header()?;
        let mut record = InspectionRecord::new(header);

        for &section in self.registry.sections() {
            self.prompt_section(section, &mut record)?;
        }

        // Same gate as the form's submit button
        let report = Validator::new().validate(&record);
        for advisory in &report.advisories {
            eprintln!("{} {}", style("⚠").yellow(), advisory);
        }
        if let Some(err) = report.errors.into_iter().next() {
            return Err(err.into());
        }

        eprintln!();
        eprintln!("{} Inspection completed!", style("✓").green());
        Ok(record)
    }

    fn prompt_header(&self) -> Result<InspectionHeader> {
        eprintln!();
        eprintln!("{}", style("Inspector Information").bold());

        let technician = self.prompt_required("Technician Name", self.defaults.technician.as_deref())?;
        let group = self.prompt_required("Group", self.defaults.group.as_deref())?;

        eprintln!();
        eprintln!("{}", style("Inspection Details").bold());

        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let date: String = Input::with_theme(&self.theme)
            .with_prompt("Inspection Date (YYYY-MM-DD)")
            .default(today)
            .validate_with(|input: &String| parse_date(input).map(|_| ()))
            .interact_text()
            .into_diagnostic()?;
        let inspection_date = parse_date(&date).map_err(|e| miette::miette!("{}", e))?;

        let equipment_tag: String = Input::with_theme(&self.theme)
            .with_prompt("Equipment Tag #")
            .default(self.defaults.equipment_tag_prefix())
            .interact_text()
            .into_diagnostic()?;

        let wo_number: String = Input::with_theme(&self.theme)
            .with_prompt("Work Order #")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let labels: Vec<&str> = InspectionType::ALL.iter().map(|t| t.label()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Select Inspection Type")
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;

        let visual_check = Confirm::with_theme(&self.theme)
            .with_prompt("Visual Inspection")
            .default(true)
            .interact()
            .into_diagnostic()?;
        let vibration_check = Confirm::with_theme(&self.theme)
            .with_prompt("Vibration Check")
            .default(true)
            .interact()
            .into_diagnostic()?;

        let mut header = InspectionHeader::new(technician, group, inspection_date)
            .with_equipment_tag(equipment_tag)
            .with_wo_number(wo_number)
            .with_inspection_type(InspectionType::ALL[selection]);
        header.visual_check = visual_check;
        header.vibration_check = vibration_check;
        Ok(header)
    }

    fn prompt_required(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(default) = default.filter(|d| !d.is_empty()) {
            input = input.default(default.to_string());
        }
        input
            .validate_with(|s: &String| {
                if s.trim().is_empty() {
                    Err("this field is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .into_diagnostic()
    }

    fn prompt_section(&self, section: SectionId, record: &mut InspectionRecord) -> Result<()> {
        eprintln!();
        eprintln!("{} {}", style("▸").cyan(), style(section.title()).bold());

        for spec in section.fields() {
            let value = self.prompt_field(spec)?;
            if let Some(note) = spec.advisory_for(&value) {
                eprintln!(
                    "  {} {} {}",
                    style("⚠").yellow(),
                    spec.display_label(),
                    style(note).yellow()
                );
            }
            record.set(section.as_str(), spec.key, value);
        }
        Ok(())
    }

    fn prompt_field(&self, spec: &FieldSpec) -> Result<FieldValue> {
        let prompt = spec.display_label();
        match spec.kind {
            ValueKind::TriState | ValueKind::Choice { .. } => {
                let options = spec.kind.options().unwrap_or_default();
                let selection = Select::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .items(options)
                    .default(0)
                    .interact()
                    .into_diagnostic()?;
                Ok(FieldValue::from(options[selection]))
            }
            ValueKind::Numeric { target, .. } => {
                let prompt = match target {
                    Some(t) => format!("{} - Target: {}", prompt, t),
                    None => prompt,
                };
                let raw: String = Input::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .default("0".to_string())
                    .validate_with(|s: &String| spec.parse_input(s).map(|_| ()))
                    .interact_text()
                    .into_diagnostic()?;
                spec.parse_input(&raw).map_err(|e| miette::miette!("{}", e))
            }
            ValueKind::Text => {
                let raw: String = Input::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .allow_empty(true)
                    .interact_text()
                    .into_diagnostic()?;
                spec.parse_input(&raw).map_err(|e| miette::miette!("{}", e))
            }
        }
    }
}

/// Accept ISO dates and the day-first form printed on reports
pub fn parse_date(input: &str) -> std::result::Result<NaiveDate, String> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .map_err(|_| format!("'{}' is not a date; use YYYY-MM-DD", input))
}
