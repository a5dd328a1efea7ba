//! Tool settings loaded from an optional JSON file.
//!
//! Settings only tune where things live and how patient prompting is; the
//! template itself stays the source of truth for what gets asked.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current schema version for `settings.json`.
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

const SETTINGS_FILE_NAME: &str = "settings.json";
const APP_DIR: &str = "boardcfg";
const SYSTEM_DEFAULT_DIR: &str = "/etc/default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub schema_version: u32,
    /// Template path overriding the embedded template.
    pub template: Option<PathBuf>,
    /// Default destination for interactively generated documents.
    pub output: Option<PathBuf>,
    /// Sections that are always generated without an opt-in question.
    pub required_sections: Vec<String>,
    pub max_prompt_attempts: u32,
    pub uart_scan_dir: PathBuf,
    pub net_class_dir: PathBuf,
    pub nic_filter: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            template: None,
            output: None,
            required_sections: Vec::new(),
            max_prompt_attempts: 10,
            uart_scan_dir: PathBuf::from("/dev/serial/by-id"),
            net_class_dir: PathBuf::from("/sys/class/net"),
            nic_filter: vec!["docker0".to_string(), "lo".to_string()],
        }
    }
}

impl Settings {
    /// Output path used when neither the CLI nor the user supplies one.
    pub fn default_output(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let system_dir = Path::new(SYSTEM_DEFAULT_DIR);
        if system_dir.is_dir() {
            return system_dir.join(APP_DIR);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("boardcfg.yaml")
    }
}

/// Default settings location under the user config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE_NAME))
}

/// Load settings from `explicit`, else the default location, else defaults.
///
/// An explicit path must exist; the default location is optional.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_settings_path().filter(|path| path.is_file()) {
            Some(path) => path,
            None => return Ok(Settings::default()),
        },
    };
    let bytes = fs::read(&path).with_context(|| format!("read settings {}", path.display()))?;
    let settings: Settings =
        serde_json::from_slice(&bytes).context("parse settings JSON")?;
    validate_settings(&settings)?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.schema_version != SETTINGS_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported settings schema_version {}",
            settings.schema_version
        ));
    }
    if settings.max_prompt_attempts == 0 {
        return Err(anyhow!("max_prompt_attempts must be at least 1"));
    }
    if let Some(name) = settings
        .required_sections
        .iter()
        .find(|name| name.trim().is_empty())
    {
        return Err(anyhow!(
            "required_sections entries must be non-empty (got {name:?})"
        ));
    }
    Ok(())
}
