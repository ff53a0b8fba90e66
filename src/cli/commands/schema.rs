//! Schema introspection
//!
//! Lists the inspection sections and the fields each one records, so record
//! files can be written by hand or generated by other tools.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::schema::registry::{FieldSpec, SchemaRegistry, SectionId, ValueKind};

#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    /// Section to show (safety, operating, reservoir, hydraulic_drive, hydraulic_pump)
    pub section: Option<String>,
}

#[derive(Serialize)]
struct SectionSummary {
    key: &'static str,
    title: &'static str,
    fields: usize,
}

pub fn run(args: SchemaArgs, global: &GlobalOpts) -> Result<()> {
    let registry = SchemaRegistry::new();

    match args.section {
        None => list_sections(&registry, global.format),
        Some(name) => {
            let section = registry.section(&name)?;
            show_section(section, global.format)
        }
    }
}

fn list_sections(registry: &SchemaRegistry, format: OutputFormat) -> Result<()> {
    let sections: Vec<SectionSummary> = registry
        .sections()
        .iter()
        .map(|s| SectionSummary {
            key: s.as_str(),
            title: s.title(),
            fields: s.fields().len(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&sections),
        OutputFormat::Yaml => print_yaml(&sections),
        _ => {
            let mut builder = Builder::default();
            builder.push_record(["SECTION", "TITLE", "FIELDS"]);
            for s in &sections {
                builder.push_record([s.key.to_string(), s.title.to_string(), s.fields.to_string()]);
            }
            print_table(builder, format);
            if format != OutputFormat::Md {
                println!("\nUse 'checksheet schema <section>' for field details");
            }
            Ok(())
        }
    }
}

fn show_section(section: SectionId, format: OutputFormat) -> Result<()> {
    let fields = section.fields();
    match format {
        OutputFormat::Json => print_json(&fields),
        OutputFormat::Yaml => print_yaml(&fields),
        _ => {
            if format != OutputFormat::Md {
                println!("{}\n", section.title());
            }
            let mut builder = Builder::default();
            builder.push_record(["KEY", "LABEL", "VALUES", "TARGET"]);
            for field in fields {
                builder.push_record([
                    field.key.to_string(),
                    field.display_label(),
                    accepted_values(field),
                    target_text(field),
                ]);
            }
            print_table(builder, format);
            Ok(())
        }
    }
}

fn accepted_values(field: &FieldSpec) -> String {
    match field.kind {
        ValueKind::Text => "text".to_string(),
        ValueKind::Numeric { input, .. } => format!("number {}", input),
        ValueKind::TriState | ValueKind::Choice { .. } => {
            field.kind.options().unwrap_or_default().join(" / ")
        }
    }
}

fn target_text(field: &FieldSpec) -> String {
    match field.kind {
        ValueKind::Numeric {
            unit,
            target: Some(target),
            ..
        } => format!("{} {}", target, unit),
        _ => String::new(),
    }
}

fn print_table(builder: Builder, format: OutputFormat) {
    let mut table = builder.build();
    match format {
        OutputFormat::Md => table.with(Style::markdown()),
        _ => table.with(Style::rounded()),
    };
    println!("{}", table);
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    print!("{}", serde_yml::to_string(value).into_diagnostic()?);
    Ok(())
}
