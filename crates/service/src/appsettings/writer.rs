use std::{fs, path::{Path, PathBuf}};

use serde_json::{json, Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use super::connection_strings::{apply_entries, lookup, CONNECTION_STRINGS_KEY};
use super::entry::ConnectionStringEntry;
use crate::errors::SettingsError;
use crate::storage::json_document_store::JsonDocumentStore;

pub const DEFAULT_CONNECTION_NAME: &str = "DefaultConnection";
pub const DEFAULT_INDENT: usize = 2;

/// Writes and rewrites appsettings documents with a fixed output style.
#[derive(Debug, Clone)]
pub struct SettingsWriter {
    temp_dir: PathBuf,
    indent: usize,
    default_connection_name: String,
}

impl Default for SettingsWriter {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            indent: DEFAULT_INDENT,
            default_connection_name: DEFAULT_CONNECTION_NAME.to_string(),
        }
    }
}

impl SettingsWriter {
    pub fn new(temp_dir: impl Into<PathBuf>, indent: usize, default_connection_name: impl Into<String>) -> Self {
        Self { temp_dir: temp_dir.into(), indent, default_connection_name: default_connection_name.into() }
    }

    pub fn from_config(cfg: &configs::TransformConfig) -> Self {
        Self {
            temp_dir: cfg.temp_dir.clone().unwrap_or_else(std::env::temp_dir),
            indent: cfg.indent,
            default_connection_name: cfg.default_connection_name.clone(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub(crate) fn store(&self, path: &Path) -> JsonDocumentStore {
        JsonDocumentStore::new(path, self.indent)
    }

    /// The skeleton document: an empty default connection plus logging boilerplate.
    pub fn default_document(&self) -> Map<String, Value> {
        let name = self.default_connection_name.as_str();
        let value = json!({
            CONNECTION_STRINGS_KEY: { name: "" },
            "Logging": {
                "LogLevel": {
                    "Default": "Warning"
                }
            }
        });
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    /// Write the skeleton document to a new file under the temp dir and
    /// return its absolute path. The caller owns the file.
    pub fn generate_default_file(&self) -> Result<PathBuf, SettingsError> {
        fs::create_dir_all(&self.temp_dir).map_err(|e| SettingsError::io(&self.temp_dir, e))?;
        let path = self.temp_dir.join(format!("appsettings_{}.json", Uuid::new_v4()));
        self.store(&path).save(&self.default_document())?;
        let path = fs::canonicalize(&path).map_err(|e| SettingsError::io(&path, e))?;
        info!(event = "default_generated", path = %path.display(), "default appsettings file generated");
        Ok(path)
    }

    /// Rewrite `path` so that `ConnectionStrings` holds every entry.
    ///
    /// With no entries the file is only validated, never rewritten.
    pub fn update_connection_strings(&self, path: &Path, entries: &[ConnectionStringEntry]) -> Result<(), SettingsError> {
        let store = self.store(path);
        if entries.is_empty() {
            store.load()?;
            debug!(path = %path.display(), "no connection strings supplied; file left as is");
            return Ok(());
        }
        store.update_map(|doc| {
            apply_entries(doc, entries);
            Ok(())
        })?;
        info!(event = "connection_strings_updated", path = %path.display(), entries = entries.len(), "connection strings updated");
        Ok(())
    }

    pub fn read_connection_string(&self, path: &Path, name: &str) -> Result<Option<String>, SettingsError> {
        let doc = self.store(path).load()?;
        Ok(lookup(&doc, name).map(str::to_string))
    }
}

/// Generate a default settings file in the OS temp dir.
pub fn generate_default_app_settings_file() -> Result<PathBuf, SettingsError> {
    SettingsWriter::default().generate_default_file()
}

/// Apply `entries` to the settings file at `path` with default formatting.
pub fn update_connection_strings(path: impl AsRef<Path>, entries: &[ConnectionStringEntry]) -> Result<(), SettingsError> {
    SettingsWriter::default().update_connection_strings(path.as_ref(), entries)
}

pub fn read_connection_string(path: impl AsRef<Path>, name: &str) -> Result<Option<String>, SettingsError> {
    SettingsWriter::default().read_connection_string(path.as_ref(), name)
}
