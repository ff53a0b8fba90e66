//! `checksheet validate` command - check records before reporting

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::schema::validator::{ValidationReport, Validator};
use crate::yaml::load_record;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Record files to validate
    #[arg(required = true)]
    pub records: Vec<PathBuf>,

    /// Strict mode - advisories become errors
    #[arg(long)]
    pub strict: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_failed: usize,
    total_errors: usize,
    total_advisories: usize,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let validator = Validator::new();
    let mut stats = ValidationStats::default();
    let mut json_reports = Vec::new();

    for path in &args.records {
        let record = load_record(path)?;
        let report = validator.validate(&record);
        stats.files_checked += 1;
        stats.total_errors += report.errors.len();
        stats.total_advisories += report.advisories.len();

        let failed = !report.is_ok() || (args.strict && !report.advisories.is_empty());
        if failed {
            stats.files_failed += 1;
        }

        match global.format {
            OutputFormat::Json => json_reports.push(report_json(path, &report, failed)),
            _ => print_report(path, &report, failed, global.quiet),
        }
    }

    if global.format == OutputFormat::Json {
        let out = serde_json::to_string_pretty(&json_reports).into_diagnostic()?;
        println!("{}", out);
    } else if !global.quiet {
        println!();
        println!(
            "Checked {} record(s): {} error(s), {} advisory(ies)",
            stats.files_checked,
            style(stats.total_errors).red(),
            style(stats.total_advisories).yellow()
        );
    }

    if stats.files_failed > 0 {
        return Err(miette::miette!(
            "{} of {} record(s) failed validation",
            stats.files_failed,
            stats.files_checked
        ));
    }
    Ok(())
}

fn print_report(path: &std::path::Path, report: &ValidationReport, failed: bool, quiet: bool) {
    let mark = if failed {
        style("✗").red()
    } else {
        style("✓").green()
    };
    println!("{} {}", mark, path.display());

    for err in &report.errors {
        println!("    {} {}", style("error:").red().bold(), err);
    }
    if !quiet {
        for advisory in &report.advisories {
            println!("    {} {}", style("warning:").yellow(), advisory);
        }
    }
}

fn report_json(path: &std::path::Path, report: &ValidationReport, failed: bool) -> serde_json::Value {
    serde_json::json!({
        "file": path.display().to_string(),
        "ok": !failed,
        "errors": report.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        "advisories": report.advisories.iter().map(|a| serde_json::json!({
            "section": a.section,
            "field": a.field,
            "value": a.value,
            "message": a.message,
        })).collect::<Vec<_>>(),
    })
}
