//! appsettings.json generation and connection-string rewriting.

pub mod connection_strings;
pub mod entry;
pub mod transform;
pub mod writer;

pub use entry::ConnectionStringEntry;
pub use transform::{TransformOutcome, TransformRequest};
pub use writer::{
    generate_default_app_settings_file, read_connection_string, update_connection_strings, SettingsWriter,
};
