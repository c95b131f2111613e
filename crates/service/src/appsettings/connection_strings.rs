use serde_json::{Map, Value};
use tracing::warn;

use super::entry::ConnectionStringEntry;

pub const CONNECTION_STRINGS_KEY: &str = "ConnectionStrings";

/// Set `ConnectionStrings[name] = value` for every entry, in order.
///
/// A missing section is created. A section that is not an object is replaced
/// by an empty one before the entries are applied. Keys outside the supplied
/// names are left as they were.
pub fn apply_entries(document: &mut Map<String, Value>, entries: &[ConnectionStringEntry]) {
    let section = document
        .entry(CONNECTION_STRINGS_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if !section.is_object() {
        warn!(event = "section_replaced", key = CONNECTION_STRINGS_KEY, "existing section is not an object; replacing it");
        *section = Value::Object(Map::new());
    }
    if let Value::Object(connections) = section {
        for entry in entries {
            connections.insert(entry.name.clone(), Value::String(entry.value.clone()));
        }
    }
}

/// Current value stored under `ConnectionStrings[name]`, if it is a string.
pub fn lookup<'a>(document: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    document.get(CONNECTION_STRINGS_KEY)?.get(name)?.as_str()
}
