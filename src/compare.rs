//! Structural comparison of expected fixture trees against live payloads.
//!
//! The walk collects every mismatch instead of stopping at the first, so a
//! failed case reports all divergent fields in one run. Objects compare with
//! subset semantics: every expected key must match, keys only present in the
//! actual payload are ignored. Arrays compare index by index after a length
//! gate. Scalars compare by value, with numbers compared numerically so `1`
//! and `1.0` are equal.

use crate::error::{Actual, Difference};
use serde_json::Value;

/// Sentinel placeholder: the field must be present in the actual payload
/// (and non-empty when it is a string); its value is otherwise unchecked.
///
/// Never substituted by [`crate::substitute::resolve_placeholders`]; it
/// survives into the expected tree and is interpreted here.
pub const VALUE_FROM_SERVER: &str = "${valueFromServer}";

/// Compares `expected` against `actual`, returning one [`Difference`] per
/// mismatch. An empty result means the payload matches.
pub fn compare_values(expected: &Value, actual: &Value) -> Vec<Difference> {
    let mut diffs = Vec::new();
    compare_at(expected, actual, "", &mut diffs);
    diffs
}

fn compare_at(expected: &Value, actual: &Value, path: &str, diffs: &mut Vec<Difference>) {
    // The sentinel is checked before the kind gate: a server-generated number
    // or object still satisfies the presence assertion.
    if let Value::String(s) = expected
        && s == VALUE_FROM_SERVER
    {
        let present = match actual {
            Value::Null => false,
            Value::String(actual) => !actual.is_empty(),
            _ => true,
        };
        if !present {
            push_diff(diffs, path, expected, actual);
        }
        return;
    }

    if expected.is_null() && actual.is_null() {
        return;
    }

    // A kind mismatch reports the whole subtree once; descending into it
    // would only produce noise.
    if kind_of(expected) != kind_of(actual) {
        push_diff(diffs, path, expected, actual);
        return;
    }

    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            for (key, exp_value) in exp {
                let child = child_path(path, key);
                match act.get(key) {
                    Some(act_value) => compare_at(exp_value, act_value, &child, diffs),
                    None => diffs.push(Difference {
                        path: child,
                        expected: exp_value.clone(),
                        actual: Actual::Missing,
                    }),
                }
            }
        }
        (Value::Array(exp), Value::Array(act)) => {
            if exp.len() != act.len() {
                diffs.push(Difference {
                    path: format!("{path}[length]"),
                    expected: Value::from(exp.len()),
                    actual: Actual::Value(Value::from(act.len())),
                });
                return;
            }
            for (i, (exp_item, act_item)) in exp.iter().zip(act).enumerate() {
                compare_at(exp_item, act_item, &format!("{path}[{i}]"), diffs);
            }
        }
        _ => {
            if !scalars_equal(expected, actual) {
                push_diff(diffs, path, expected, actual);
            }
        }
    }
}

fn push_diff(diffs: &mut Vec<Difference>, path: &str, expected: &Value, actual: &Value) {
    diffs.push(Difference {
        path: path.to_string(),
        expected: expected.clone(),
        actual: Actual::Value(actual.clone()),
    });
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Upstream sandboxes decode numbers as doubles, so two numbers are equal when
// their double representations are.
fn scalars_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => fa == fb,
            _ => a == b,
        },
        _ => expected == actual,
    }
}
