//! Helpers for comparing seeded rows or API payloads in tests.

use serde_json::Value;

/// Remove every key in `keys` from `data`, at every nesting level.
///
/// Volatile fields (ids, timestamps) are stripped before comparing against
/// a fixture. Arrays are walked element by element; scalars are untouched.
pub fn remove_property(data: &mut Value, keys: &[&str]) {
    match data {
        Value::Object(map) => {
            for value in map.values_mut() {
                remove_property(value, keys);
            }
            for key in keys {
                map.remove(*key);
            }
        }
        Value::Array(items) => {
            for item in items {
                remove_property(item, keys);
            }
        }
        _ => {}
    }
}
