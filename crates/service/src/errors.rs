use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("invalid connection string entry: {0}")]
    InvalidEntry(String),
}

impl SettingsError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub fn parse(path: &Path, reason: impl Into<String>) -> Self {
        Self::Parse { path: path.to_path_buf(), reason: reason.into() }
    }

    pub fn is_io(&self) -> bool { matches!(self, Self::Io { .. }) }

    pub fn is_parse(&self) -> bool { matches!(self, Self::Parse { .. }) }
}
