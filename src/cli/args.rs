//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    collect::CollectArgs, completions::CompletionsArgs, config::ConfigCommands,
    export::ExportArgs, new::NewArgs, report::ReportArgs, schema::SchemaArgs,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "checksheet")]
#[command(author, version, about = "Condition-monitoring inspection check sheets")]
#[command(long_about = "Collect hydraulic power pack inspections as plain YAML records, then render them to printable Word reports and CSV data sheets.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Extra config file, applied over the global and local config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Branding preset for reports (ambatovy, vibro-sens)
    #[arg(long, global = true, env = "CHECKSHEET_BRANDING")]
    pub branding: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a blank inspection record to fill in by hand
    New(NewArgs),

    /// Collect an inspection interactively
    Collect(CollectArgs),

    /// Check a record for missing header fields and out-of-range values
    Validate(ValidateArgs),

    /// Render a record as a printable report (docx, md, json)
    Report(ReportArgs),

    /// Flatten records into a CSV data sheet
    Export(ExportArgs),

    /// Show inspection sections and fields
    Schema(SchemaArgs),

    /// Manage configuration settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (table for terminals)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (for programming)
    Json,
    /// Markdown tables
    Md,
}
