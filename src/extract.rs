//! Extraction of server-generated values from response payloads.
//!
//! Chained cases feed one response's generated values (order reference,
//! redirect URL) into the next request; extraction is how those values leave
//! the parsed payload returned by an assertion.

use crate::error::ExtractError;
use serde_json::Value;

/// Resolves a JSONPath selector against a payload and renders the first
/// match as a string: scalars in their natural representation, containers as
/// compact JSON. A bare top-level key reads as `$.originalReferenceNo`.
pub fn string_at(body: &Value, selector: &str) -> Result<String, ExtractError> {
    let path = serde_json_path::JsonPath::parse(selector).map_err(|e| ExtractError {
        selector: selector.to_string(),
        message: format!("invalid selector: {}", e),
    })?;
    let node_list = path.query(body);
    let first = node_list.first().ok_or_else(|| ExtractError {
        selector: selector.to_string(),
        message: "no value at selector".to_string(),
    })?;

    Ok(match first {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => serde_json::to_string(first).unwrap_or_default(),
    })
}
