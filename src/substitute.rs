//! Placeholder resolution for fixture templates.
//!
//! Catalog entries carry `${name}` placeholders for values only known at run
//! time (partner reference numbers, timestamps, values extracted from earlier
//! responses). Resolution is a pure transform: it rebuilds the tree, touching
//! only string leaves that are exactly one placeholder.

use serde_json::Value;
use std::collections::HashMap;

/// Runtime values substituted into fixture placeholders, keyed by bare name.
pub type VarMap = HashMap<String, Value>;

/// Extracts `name` from a string that is exactly `${name}`.
///
/// Partial wraps (`"id: ${x}"`, `"${x"`) return `None`; there is no
/// interpolation inside larger strings.
pub fn placeholder_name(s: &str) -> Option<&str> {
    s.strip_prefix("${")?.strip_suffix('}')
}

/// Replaces every string leaf equal to `${name}` for a key `name` in `vars`
/// with the mapped value, which may be of any JSON type.
///
/// Unmatched placeholders pass through untouched, so the sentinel
/// [`crate::compare::VALUE_FROM_SERVER`] survives as long as no variable is
/// named `valueFromServer`. Object keys are never rewritten.
pub fn resolve_placeholders(data: &Value, vars: &VarMap) -> Value {
    match data {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), resolve_placeholders(value, vars)))
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| resolve_placeholders(item, vars)).collect())
        }
        Value::String(s) => match placeholder_name(s).and_then(|name| vars.get(name)) {
            Some(replacement) => replacement.clone(),
            None => data.clone(),
        },
        _ => data.clone(),
    }
}
