//! Shared helper functions for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::config::Config;

/// Load the layered config, then apply command-line overrides
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    let mut config = Config::load(global.config.as_deref())
        .map_err(|e| miette::miette!("Cannot load config: {}", e))?;
    if let Some(ref branding) = global.branding {
        config.branding = Some(branding.clone());
    }
    Ok(config)
}

/// Write `content` to `path`, or to stdout when no path is given
pub fn write_output(content: &[u8], path: Option<&Path>, global: &GlobalOpts) -> Result<()> {
    match path {
        Some(path) => {
            write_file(path, content)?;
            if !global.quiet {
                eprintln!(
                    "{} Wrote {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content).into_diagnostic()?;
            stdout.flush().into_diagnostic()?;
        }
    }
    Ok(())
}

/// Write a file, creating its parent directory when needed
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }
    }
    fs::write(path, content)
        .map_err(|e| miette::miette!("Cannot write {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Resolve an export path: `-o` wins, else `file_name` under the output dir
pub fn resolve_output_path(explicit: Option<PathBuf>, config: &Config, file_name: &str) -> PathBuf {
    explicit.unwrap_or_else(|| config.output_dir().join(file_name))
}
