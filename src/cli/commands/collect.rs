//! `checksheet collect` command - interactive inspection

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{load_config, write_output};
use crate::cli::GlobalOpts;
use crate::schema::wizard::SchemaWizard;
use crate::yaml::record_to_yaml;

#[derive(clap::Args, Debug)]
pub struct CollectArgs {
    /// Write the record to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: CollectArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let record = SchemaWizard::new(config).run()?;
    tracing::info!(
        technician = %record.header.technician_name,
        sections = record.sections.len(),
        "inspection collected"
    );

    let yaml = record_to_yaml(&record).into_diagnostic()?;
    write_output(yaml.as_bytes(), args.output.as_deref(), global)
}
