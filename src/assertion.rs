//! Assertion entry points for success-path and error-path payloads.
//!
//! Both entry points resolve a case's expected response from the catalog,
//! substitute runtime variables into it, parse the actual payload, and run
//! the structural comparison. They differ only in where the actual bytes
//! come from: [`assert_response`] takes a response body directly, while
//! [`assert_fail_response`] first normalizes an [`ErrorInfo`], which may be a
//! pre-formatted SDK error string with the JSON body buried in one line.

use crate::catalog::Catalog;
use crate::compare::compare_values;
use crate::error::{AssertError, MismatchReport, ReportContext};
use crate::substitute::{VarMap, resolve_placeholders};
use serde_json::{Map, Value};
use tracing::debug;

/// Prefix SDK error formatters put in front of the echoed body line.
const BODY_PREFIX: &str = "HTTP response body: ";

/// The two shapes an upstream failure arrives in, normalized to raw body
/// bytes before comparison.
#[derive(Clone, Debug)]
pub enum ErrorInfo {
    /// Body bytes already read from a non-2xx HTTP response.
    Body(Vec<u8>),
    /// A formatted SDK error string with the JSON body embedded in one line,
    /// typically `"400 Bad Request\nHTTP response body: {...}"`.
    Message(String),
}

impl From<Vec<u8>> for ErrorInfo {
    fn from(bytes: Vec<u8>) -> Self {
        ErrorInfo::Body(bytes)
    }
}

impl From<&[u8]> for ErrorInfo {
    fn from(bytes: &[u8]) -> Self {
        ErrorInfo::Body(bytes.to_vec())
    }
}

impl From<String> for ErrorInfo {
    fn from(message: String) -> Self {
        ErrorInfo::Message(message)
    }
}

impl From<&str> for ErrorInfo {
    fn from(message: &str) -> Self {
        ErrorInfo::Message(message.to_string())
    }
}

impl ErrorInfo {
    fn into_body(self) -> Result<Vec<u8>, AssertError> {
        match self {
            ErrorInfo::Body(bytes) => Ok(bytes),
            ErrorInfo::Message(message) => match json_fragment(&message) {
                Some(line) => Ok(line.into_bytes()),
                None => Err(AssertError::NoJsonFragment { message }),
            },
        }
    }
}

/// Pulls the JSON body line out of a formatted SDK error string: the first
/// `HTTP response body: ` prefix is dropped, then the first line containing
/// both braces wins. A message with no such line has no body to compare and
/// is reported as such rather than guessed at.
fn json_fragment(message: &str) -> Option<String> {
    let cleaned = message.replacen(BODY_PREFIX, "", 1);
    cleaned
        .lines()
        .find(|line| line.contains('{') && line.contains('}'))
        .map(|line| line.to_string())
}

/// Asserts that a success-path response body matches the case's expected
/// response. Returns the parsed payload so callers can extract generated
/// values from it.
pub fn assert_response(
    catalog: &Catalog,
    title: &str,
    case: &str,
    vars: &VarMap,
    body: &str,
) -> Result<Value, AssertError> {
    let expected = catalog.response(title, case).map_err(AssertError::Catalog)?;
    let expected = resolve_placeholders(&expected, vars);
    let actual = parse_body(body.as_bytes())?;
    finish(&expected, actual, ReportContext::Response)
}

/// Asserts that an error-path payload matches the case's expected response.
///
/// Accepts anything convertible to [`ErrorInfo`]: raw body bytes, or the
/// formatted error string an SDK surfaced. Returns the parsed payload.
pub fn assert_fail_response(
    catalog: &Catalog,
    title: &str,
    case: &str,
    vars: &VarMap,
    info: impl Into<ErrorInfo>,
) -> Result<Value, AssertError> {
    let expected = catalog.response(title, case).map_err(AssertError::Catalog)?;
    let expected = resolve_placeholders(&expected, vars);
    let body = info.into().into_body()?;
    let actual = parse_body(&body)?;
    finish(&expected, actual, ReportContext::ErrorResponse)
}

fn parse_body(raw: &[u8]) -> Result<Value, AssertError> {
    match serde_json::from_slice::<Map<String, Value>>(raw) {
        Ok(map) => Ok(Value::Object(map)),
        Err(e) => Err(AssertError::Body {
            message: e.to_string(),
            raw: String::from_utf8_lossy(raw).into_owned(),
        }),
    }
}

fn finish(
    expected: &Value,
    actual: Value,
    context: ReportContext,
) -> Result<Value, AssertError> {
    let differences = compare_values(expected, &actual);
    let what = match context {
        ReportContext::Response => "response",
        ReportContext::ErrorResponse => "error response",
    };
    if differences.is_empty() {
        debug!("Assertion passed: API {} matches the expected data {}", what, actual);
        Ok(actual)
    } else {
        debug!("Actual {}: {}", what, actual);
        Err(AssertError::Mismatch(MismatchReport { context, differences, actual }))
    }
}
