//! `checksheet config` command - Configuration management
//!
//! Provides commands to view and modify checksheet configuration.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::helpers::{load_config, write_file};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::{Config, CONFIG_KEYS, LOCAL_CONFIG_FILE};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., branding, output_dir)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in ./checksheet.yaml instead of the global config
    #[arg(long, short = 'l')]
    pub local: bool,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Set(args) => run_set(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;

    if let Some(key) = &args.key {
        let value = config_value(&config, key)?;
        match value {
            Some(v) => println!("{}", v),
            None => return Err(miette::miette!("Key '{}' is not set", key)),
        }
        return Ok(());
    }

    if global.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&config).into_diagnostic()?);
        return Ok(());
    }
    if global.format == OutputFormat::Yaml {
        print!("{}", serde_yml::to_string(&config).into_diagnostic()?);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in CONFIG_KEYS {
        print_config_value(key, config_value(&config, key)?.as_deref());
    }

    let branding = config.branding();
    println!();
    println!("  {:<22} {}", style("(report header)").dim(), branding.header_text());
    println!("  {:<22} {}", style("(report title)").dim(), branding.title);

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line flags (--branding, --config)");
    println!("  2. Environment variables (CHECKSHEET_BRANDING, CHECKSHEET_OUTPUT_DIR, ...)");
    println!("  3. Local config (./{})", LOCAL_CONFIG_FILE);
    println!("  4. Global config (~/.config/checksheet/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs) -> Result<()> {
    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        global_config_path()?
    };

    // Load existing config or start empty
    let mut config: Config = if config_path.exists() {
        let content = fs::read_to_string(&config_path).into_diagnostic()?;
        serde_yml::from_str::<Option<Config>>(&content)
            .into_diagnostic()?
            .unwrap_or_default()
    } else {
        Config::default()
    };

    config
        .set(&args.key, &args.value)
        .map_err(|e| miette::miette!(help = valid_keys_help(), "{}", e))?;

    let yaml = serde_yml::to_string(&config).into_diagnostic()?;
    write_file(&config_path, yaml.as_bytes())?;

    let scope = if args.local { "local" } else { "global" };
    println!(
        "{} Set {} {} {} in {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        scope
    );

    Ok(())
}

fn run_path() -> Result<()> {
    let global_path = global_config_path()?;
    let exists = |p: &std::path::Path| {
        if p.exists() {
            style("(exists)").green()
        } else {
            style("(not created)").dim()
        }
    };

    println!("Global: {} {}", global_path.display(), exists(&global_path));
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    println!("Local:  {} {}", local.display(), exists(&local));
    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available Configuration Keys").bold().underlined());
    println!();
    for (key, description) in CONFIG_KEYS {
        println!("  {:<22} {}", style(key).cyan(), description);
    }
    Ok(())
}

fn global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine config directory"))
}

fn config_value(config: &Config, key: &str) -> Result<Option<String>> {
    let value = match key {
        "branding" => config.branding.clone(),
        "company" => config.company.clone(),
        "subtitle" => config.subtitle.clone(),
        "title" => config.title.clone(),
        "output_dir" => config.output_dir.as_ref().map(|p| p.display().to_string()),
        "technician" => config.technician.clone(),
        "group" => config.group.clone(),
        "equipment_tag_prefix" => config.equipment_tag_prefix.clone(),
        _ => {
            return Err(miette::miette!(
                help = valid_keys_help(),
                "Unknown config key: {}",
                key
            ))
        }
    };
    Ok(value)
}

fn valid_keys_help() -> String {
    format!(
        "valid keys: {}",
        CONFIG_KEYS
            .iter()
            .map(|(k, _)| *k)
            .collect::<Vec<_>>()
            .join(", ")
    )
}

fn print_config_value(key: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {:<22} {}", style(key).cyan(), v),
        None => println!("  {:<22} {}", style(key).cyan(), style("(not set)").dim()),
    }
}
