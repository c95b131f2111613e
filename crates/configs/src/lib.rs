use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "appsettings-transform.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub transform: TransformConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransformConfig {
    /// Directory for generated default files; falls back to the OS temp dir.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    #[serde(default = "default_indent")]
    pub indent: usize,
    #[serde(default = "default_connection_name")]
    pub default_connection_name: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self { temp_dir: None, indent: default_indent(), default_connection_name: default_connection_name() }
    }
}

fn default_indent() -> usize { 2 }
fn default_connection_name() -> String { "DefaultConnection".to_string() }

/// Load from `CONFIG_PATH` (or the default file name). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
    let cfg: AppConfig = toml::from_str(&content).with_context(|| format!("parsing config {path}"))?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.transform.normalize_from_env();
        self.transform.validate()?;
        Ok(())
    }
}

impl TransformConfig {
    pub fn normalize_from_env(&mut self) {
        self.default_connection_name = self.default_connection_name.trim().to_string();
        if self.temp_dir.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            self.temp_dir = None;
        }
        if self.temp_dir.is_none() {
            if let Ok(dir) = std::env::var("APPSETTINGS_TEMP_DIR") {
                if !dir.trim().is_empty() {
                    self.temp_dir = Some(PathBuf::from(dir));
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_connection_name.is_empty() {
            return Err(anyhow!("transform.default_connection_name must not be empty"));
        }
        if self.indent > 8 {
            return Err(anyhow!("transform.indent must be in 0..=8, got {}", self.indent));
        }
        Ok(())
    }
}
