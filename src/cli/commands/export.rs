//! `checksheet export` command - flatten records into one CSV data sheet

use chrono::Utc;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_config, resolve_output_path, write_output};
use crate::cli::GlobalOpts;
use crate::export::{data_file_name, CsvSink};
use crate::report::{flatten, ReportAssembler};
use crate::yaml::load_record;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Inspection record files, one CSV row each
    #[arg(required = true)]
    pub records: Vec<PathBuf>,

    /// Output file (default: inspection_data_<timestamp>.csv in the output dir)
    #[arg(long, short = 'o', conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write CSV to stdout
    #[arg(long)]
    pub stdout: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;

    let assembler = ReportAssembler::new(config.branding());
    let mut sink = CsvSink::new();
    for path in &args.records {
        let record = load_record(path)?;
        assembler.check(&record).inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "record rejected, nothing exported");
        })?;
        sink.push(flatten(&record));
    }
    let bytes = sink.to_bytes()?;

    let output = if args.stdout {
        None
    } else {
        Some(resolve_output_path(
            args.output,
            &config,
            &data_file_name(Utc::now()),
        ))
    };

    tracing::debug!(rows = sink.len(), mime = sink.mime_type(), "exported csv");
    write_output(&bytes, output.as_deref(), global)
}
