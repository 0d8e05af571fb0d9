use crate::args::ColumnArgs;
use anyhow::{Context, Result, anyhow};
use proctwin_engine::DEFAULT_PREVIEW_LIMIT;
use proctwin_types::{CASE_ID_COLUMN, ColumnMapping, STEP_COLUMN, TIMESTAMP_COLUMN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. PROCTWIN_PATH environment variable (directory, with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.proctwin (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(&path.to_string_lossy()));
    }

    if let Ok(env_path) = std::env::var("PROCTWIN_PATH") {
        return Ok(expand_tilde(&env_path).join("config.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("proctwin").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".proctwin").join("config.toml"));
    }

    Err(anyhow!(
        "Could not determine config path: no HOME directory or XDG config directory found"
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Default source column names, used when no CLI override is given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_case")]
    pub case: String,
    #[serde(default = "default_step")]
    pub step: String,
    #[serde(default = "default_timestamp")]
    pub timestamp: Option<String>,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            case: default_case(),
            step: default_step(),
            timestamp: default_timestamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// External generator argv; receives the payload JSON on stdin
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            domain: default_domain(),
            preview_limit: default_preview_limit(),
        }
    }
}

fn default_case() -> String {
    CASE_ID_COLUMN.to_string()
}

fn default_step() -> String {
    STEP_COLUMN.to_string()
}

fn default_timestamp() -> Option<String> {
    Some(TIMESTAMP_COLUMN.to_string())
}

fn default_domain() -> String {
    "generic".to_string()
}

fn default_preview_limit() -> usize {
    DEFAULT_PREVIEW_LIMIT
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Column mapping after applying CLI overrides.
    ///
    /// An empty `--ts-col` (or `timestamp = ""` in the config) disables
    /// timestamps for the run.
    pub fn mapping(&self, overrides: &ColumnArgs) -> ColumnMapping {
        let timestamp = match overrides.ts_col.as_deref() {
            Some("") => None,
            Some(col) => Some(col.to_string()),
            None => self.columns.timestamp.clone().filter(|col| !col.is_empty()),
        };

        ColumnMapping {
            case: overrides
                .case_col
                .clone()
                .unwrap_or_else(|| self.columns.case.clone()),
            step: overrides
                .step_col
                .clone()
                .unwrap_or_else(|| self.columns.step.clone()),
            timestamp,
        }
    }
}
