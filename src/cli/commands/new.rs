//! `checksheet new` command - blank record for hand-filled inspections

use chrono::{Local, NaiveDate};
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_config, write_output};
use crate::cli::GlobalOpts;
use crate::core::record::InspectionType;
use crate::schema::template::{TemplateContext, TemplateGenerator};
use crate::schema::wizard::parse_date;

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Write the record to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Technician name (default: from config)
    #[arg(long)]
    pub technician: Option<String>,

    /// Crew or shift group (default: from config)
    #[arg(long)]
    pub group: Option<String>,

    /// Equipment tag, e.g. 31-TM-01 (default: the configured tag prefix)
    #[arg(long)]
    pub tag: Option<String>,

    /// Work order number
    #[arg(long)]
    pub wo: Option<String>,

    /// Inspection type (thickener_i, thickener_ii)
    #[arg(long = "type", short = 't', default_value = "thickener_i")]
    pub inspection_type: InspectionType,

    /// Inspection date, YYYY-MM-DD or DD/MM/YYYY (default: today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;

    let equipment_tag = args.tag.unwrap_or_else(|| config.equipment_tag_prefix());
    let ctx = TemplateContext::new(args.date.unwrap_or_else(|| Local::now().date_naive()))
        .with_title(config.branding().title)
        .with_technician(args.technician.or(config.technician).unwrap_or_default())
        .with_group(args.group.or(config.group).unwrap_or_default())
        .with_equipment_tag(equipment_tag)
        .with_wo_number(args.wo.unwrap_or_default())
        .with_inspection_type(args.inspection_type);

    let content = generator
        .generate_record(&ctx)
        .map_err(|e| miette::miette!("{}", e))?;

    write_output(content.as_bytes(), args.output.as_deref(), global)
}
