//! Shared runtime helpers for the appsettings-transform binaries.

pub mod utils;
