//! `checksheet report` command - render a record as a printable report

use chrono::Utc;
use clap::ValueEnum;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_config, resolve_output_path, write_output};
use crate::cli::GlobalOpts;
use crate::export::{report_file_name, DocumentSink, DocxSink, JsonSink, MarkdownSink};
use crate::report::ReportAssembler;
use crate::yaml::load_record;

/// Report document format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Word document
    #[default]
    Docx,
    /// Markdown tables
    Md,
    /// Document tree as JSON
    Json,
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Inspection record file
    pub record: PathBuf,

    /// Document format
    #[arg(long, default_value = "docx")]
    pub to: ReportFormat,

    /// Output file (docx default: inspection_report_<timestamp>.docx in the output dir)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let record = load_record(&args.record)?;

    let document = ReportAssembler::new(config.branding()).assemble(&record)?;
    let flagged = document.flagged_cells().count();
    if flagged > 0 && !global.quiet {
        tracing::warn!(flagged, "report contains values outside target range");
    }

    let sink: Box<dyn DocumentSink> = match args.to {
        ReportFormat::Docx => Box::new(DocxSink),
        ReportFormat::Md => Box::new(MarkdownSink),
        ReportFormat::Json => Box::new(JsonSink),
    };
    let bytes = sink.render(&document)?;

    // Binary output never goes to the terminal
    let output = match args.to {
        ReportFormat::Docx => Some(resolve_output_path(
            args.output,
            &config,
            &report_file_name(sink.extension(), Utc::now()),
        )),
        _ => args.output,
    };

    tracing::debug!(mime = sink.mime_type(), bytes = bytes.len(), "rendered report");
    write_output(&bytes, output.as_deref(), global)
}
