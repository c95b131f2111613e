//! Settings layer for the appsettings transform.
//! - Generates default appsettings documents.
//! - Merges connection strings into existing documents without touching other keys.
//! - Writes are all-or-nothing: a failed call leaves the target file as it was.

pub mod errors;
pub mod storage;
pub mod appsettings;

pub use appsettings::{
    generate_default_app_settings_file, read_connection_string, update_connection_strings, ConnectionStringEntry,
    SettingsWriter, TransformOutcome, TransformRequest,
};
pub use errors::SettingsError;
