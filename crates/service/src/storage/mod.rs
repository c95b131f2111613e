//! Storage abstractions for the settings layer
//!
//! File-backed JSON documents that are loaded, mutated and written back
//! in a single call.

pub mod json_document_store;
