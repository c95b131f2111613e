use std::{fs, path::{Path, PathBuf}};

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Value};
use tracing::debug;

use crate::errors::SettingsError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// JSON file holding a single top-level object.
///
/// Every mutation is a load-mutate-store round trip against the file; nothing is
/// cached between calls. Key order of the object is kept as read.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    file_path: PathBuf,
    indent: usize,
}

impl JsonDocumentStore {
    /// Open a store over an existing or yet-to-be-written file.
    /// `indent` is the number of spaces per level; 0 writes compact JSON.
    pub fn new<P: Into<PathBuf>>(path: P, indent: usize) -> Self {
        Self { file_path: path.into(), indent }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read and parse the file; the root must be a JSON object.
    pub fn load(&self) -> Result<Map<String, Value>, SettingsError> {
        let bytes = fs::read(&self.file_path).map_err(|e| SettingsError::io(&self.file_path, e))?;
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SettingsError::parse(&self.file_path, e.to_string()))?;
        match value {
            Value::Object(map) => Ok(map),
            other => Err(SettingsError::parse(
                &self.file_path,
                format!("root must be a JSON object, found {}", kind_of(&other)),
            )),
        }
    }

    /// Serialize `map` in full, then swap it into place.
    ///
    /// Symlinks are followed and the existing file's permissions are kept.
    /// The replacement is staged next to the target, so the containing
    /// directory must be writable even when the file itself is.
    pub fn save(&self, map: &Map<String, Value>) -> Result<(), SettingsError> {
        let data = self.encode(map)?;
        write_replace(&self.file_path, &data)?;
        debug!(path = %self.file_path.display(), bytes = data.len(), "settings document written");
        Ok(())
    }

    /// Apply a mutation to the stored object and persist it.
    /// The file is left untouched when loading or `f` fails.
    pub fn update_map<F>(&self, f: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Map<String, Value>) -> Result<(), SettingsError>,
    {
        let mut map = self.load()?;
        f(&mut map)?;
        self.save(&map)
    }

    fn encode(&self, map: &Map<String, Value>) -> Result<Vec<u8>, SettingsError> {
        let mut out = Vec::new();
        let result = if self.indent == 0 {
            serde_json::to_writer(&mut out, map)
        } else {
            let indent = vec![b' '; self.indent];
            let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
            map.serialize(&mut ser)
        };
        result.map_err(|e| SettingsError::parse(&self.file_path, e.to_string()))?;
        out.push(b'\n');
        Ok(out)
    }
}

/// Write `data` to a temp file beside the resolved target and rename it over.
pub(crate) fn write_replace(path: &Path, data: &[u8]) -> Result<(), SettingsError> {
    // a missing file has nothing to resolve
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "settings.json".to_string());
    let tmp = target.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    let result = fs::write(&tmp, data)
        .and_then(|()| match permissions {
            Some(perms) => fs::set_permissions(&tmp, perms),
            None => Ok(()),
        })
        .map_err(|e| SettingsError::io(&tmp, e))
        .and_then(|()| fs::rename(&tmp, &target).map_err(|e| SettingsError::io(&target, e)));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
