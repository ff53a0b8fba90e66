//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = "checksheet.yaml";

/// Company branding printed on reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub company: String,
    pub subtitle: String,
    pub title: String,
}

impl Branding {
    /// Built-in branding presets
    pub const PRESETS: [&'static str; 2] = ["ambatovy", "vibro-sens"];

    pub fn preset(name: &str) -> Option<Self> {
        let company = match name.to_lowercase().replace('_', "-").as_str() {
            "ambatovy" => "AMBATOVY",
            "vibro-sens" | "vibrosens" => "VIBRO-SENS",
            _ => return None,
        };
        Some(Self {
            company: company.to_string(),
            subtitle: "Condition Monitoring Rotating Equipment".to_string(),
            title: "Thickener Hydraulic Power Pack CM Check Sheet".to_string(),
        })
    }

    /// Running page-header text, e.g. "AMBATOVY - Condition Monitoring ..."
    pub fn header_text(&self) -> String {
        if self.subtitle.is_empty() {
            self.company.clone()
        } else {
            format!("{} - {}", self.company, self.subtitle)
        }
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company: "AMBATOVY".to_string(),
            subtitle: "Condition Monitoring Rotating Equipment".to_string(),
            title: "Thickener Hydraulic Power Pack CM Check Sheet".to_string(),
        }
    }
}

/// Checksheet configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Branding preset name (ambatovy, vibro-sens)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<String>,

    /// Custom company name, overrides the preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Custom header subtitle, overrides the preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Custom report title, overrides the preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Directory for exported files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Default technician name offered by the collector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,

    /// Default group offered by the collector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Equipment tag prefix offered by the collector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_tag_prefix: Option<String>,
}

/// Keys accepted by `checksheet config set`
pub const CONFIG_KEYS: [(&str, &str); 8] = [
    ("branding", "Branding preset (ambatovy, vibro-sens)"),
    ("company", "Company name on the report header"),
    ("subtitle", "Subtitle on the report header"),
    ("title", "Report title"),
    ("output_dir", "Directory for exported reports and CSV files"),
    ("technician", "Default technician name"),
    ("group", "Default group"),
    ("equipment_tag_prefix", "Equipment tag prefix for new records"),
];

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// `explicit` is a file named on the command line; it must exist.
    pub fn load(explicit: Option<&Path>) -> std::io::Result<Self> {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/checksheet/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            config.merge_file(&global_path);
        }

        // 3. Config in the working directory (./checksheet.yaml)
        config.merge_file(Path::new(LOCAL_CONFIG_FILE));

        // 4. Config named on the command line
        if let Some(path) = explicit {
            let contents = std::fs::read_to_string(path)?;
            let file_config = serde_yml::from_str::<Config>(&contents)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            config.merge(file_config);
        }

        // 5. Environment variables
        if let Ok(branding) = std::env::var("CHECKSHEET_BRANDING") {
            config.branding = Some(branding);
        }
        if let Ok(dir) = std::env::var("CHECKSHEET_OUTPUT_DIR") {
            config.output_dir = Some(PathBuf::from(dir));
        }
        if let Ok(technician) = std::env::var("CHECKSHEET_TECHNICIAN") {
            config.technician = Some(technician);
        }
        if let Ok(group) = std::env::var("CHECKSHEET_GROUP") {
            config.group = Some(group);
        }

        Ok(config)
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "checksheet")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge a config file if it exists and parses; unreadable files are skipped
    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|s| serde_yml::from_str::<Config>(&s).map_err(|e| e.to_string()))
        {
            Ok(other) => {
                tracing::debug!(path = %path.display(), "loaded config");
                self.merge(other);
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring config file"),
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.branding.is_some() {
            self.branding = other.branding;
        }
        if other.company.is_some() {
            self.company = other.company;
        }
        if other.subtitle.is_some() {
            self.subtitle = other.subtitle;
        }
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.technician.is_some() {
            self.technician = other.technician;
        }
        if other.group.is_some() {
            self.group = other.group;
        }
        if other.equipment_tag_prefix.is_some() {
            self.equipment_tag_prefix = other.equipment_tag_prefix;
        }
    }

    /// Set a key by name; returns an error message for unknown keys
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = Some(value.to_string());
        match key {
            "branding" => self.branding = value,
            "company" => self.company = value,
            "subtitle" => self.subtitle = value,
            "title" => self.title = value,
            "output_dir" => self.output_dir = value.map(PathBuf::from),
            "technician" => self.technician = value,
            "group" => self.group = value,
            "equipment_tag_prefix" => self.equipment_tag_prefix = value,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Resolve the branding, custom fields taking precedence over the preset
    ///
    /// An unknown preset name falls back to the default branding.
    pub fn branding(&self) -> Branding {
        let mut branding = match self.branding.as_deref() {
            Some(name) => Branding::preset(name).unwrap_or_else(|| {
                tracing::warn!(preset = name, "unknown branding preset, using default");
                Branding::default()
            }),
            None => Branding::default(),
        };
        if let Some(ref company) = self.company {
            branding.company = company.clone();
        }
        if let Some(ref subtitle) = self.subtitle {
            branding.subtitle = subtitle.clone();
        }
        if let Some(ref title) = self.title {
            branding.title = title.clone();
        }
        branding
    }

    /// Directory exported files go to
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn equipment_tag_prefix(&self) -> String {
        self.equipment_tag_prefix
            .clone()
            .unwrap_or_else(|| "31 - TM -".to_string())
    }
}
