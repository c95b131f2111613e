use std::{fs, path::PathBuf};

use tracing::{info, warn};

use super::connection_strings::apply_entries;
use super::entry::ConnectionStringEntry;
use super::writer::SettingsWriter;
use crate::errors::SettingsError;

/// One publish step: seed the destination from `source` (or a generated
/// default when the source is absent) and apply `entries` to it.
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub source: Option<PathBuf>,
    pub destination: PathBuf,
    pub entries: Vec<ConnectionStringEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    /// No entries were supplied; nothing was read or written.
    Skipped,
    Applied { seeded_from_default: bool, entries: usize },
}

impl SettingsWriter {
    pub fn transform_app_settings(&self, request: &TransformRequest) -> Result<TransformOutcome, SettingsError> {
        if request.entries.is_empty() {
            info!(event = "transform_skipped", destination = %request.destination.display(), "no connection strings to apply");
            return Ok(TransformOutcome::Skipped);
        }

        let existing_source = request.source.as_ref().filter(|p| p.is_file());
        let (source, generated) = match existing_source {
            Some(path) => (path.clone(), false),
            None => {
                if let Some(missing) = &request.source {
                    warn!(source = %missing.display(), "source appsettings not found; seeding from default");
                }
                (self.generate_default_file()?, true)
            }
        };

        let result = self.write_destination(&source, request);

        if generated {
            if let Err(e) = fs::remove_file(&source) {
                warn!(path = %source.display(), error = %e, "failed to remove generated default file");
            }
        }
        result?;

        info!(
            event = "transform_applied",
            destination = %request.destination.display(),
            seeded_from_default = generated,
            entries = request.entries.len(),
            "appsettings transformed"
        );
        Ok(TransformOutcome::Applied { seeded_from_default: generated, entries: request.entries.len() })
    }

    fn write_destination(&self, source: &std::path::Path, request: &TransformRequest) -> Result<(), SettingsError> {
        let mut document = self.store(source).load()?;
        apply_entries(&mut document, &request.entries);

        if let Some(parent) = request.destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
        }
        self.store(&request.destination).save(&document)
    }
}
