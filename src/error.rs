use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Marker used when serializing and displaying a missing actual-side value.
const MISSING_MARKER: &str = "MISSING";

/// Error kind for catalog load failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogErrorKind {
    Io,
    Json,
    TitleNotFound,
    CaseNotFound,
    SectionNotFound,
}

/// Produced when a fixture catalog cannot be read or a case cannot be resolved.
///
/// Always fatal to the test that asked for the case; never retried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogError {
    pub kind: CatalogErrorKind,
    pub message: String,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CatalogError {}

/// Produced by `string_at` when a selector fails to parse or yields no value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractError {
    pub selector: String,
    pub message: String,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.selector)
    }
}

impl std::error::Error for ExtractError {}

/// The actual-side value of a difference record.
///
/// A key present in the expected tree but absent from the actual tree reports
/// as `Missing`. Serializes to the literal string `"MISSING"`, same as the
/// report text, so compare-case fixtures can state full expected records.
#[derive(Clone, Debug, PartialEq)]
pub enum Actual {
    Missing,
    Value(Value),
}

impl Serialize for Actual {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Actual::Missing => serializer.serialize_str(MISSING_MARKER),
            Actual::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Actual {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::String(s) if s == MISSING_MARKER => Ok(Actual::Missing),
            _ => Ok(Actual::Value(value)),
        }
    }
}

impl fmt::Display for Actual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actual::Missing => write!(f, "{}", MISSING_MARKER),
            Actual::Value(v) => write!(f, "{}", v),
        }
    }
}

/// One reported mismatch between the expected and actual trees, located by a
/// dot-and-bracket path (`order.items[2].amount`). Array length mismatches
/// report at `path[length]` with the two lengths as values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    pub path: String,
    pub expected: Value,
    pub actual: Actual,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Path: {}\n  Expected: {}\n  Actual: {}",
            self.path, self.expected, self.actual
        )
    }
}

/// Which assertion path produced a report, for the report heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportContext {
    Response,
    ErrorResponse,
}

/// Everything a failed comparison reports: every difference record found
/// (the walk never stops at the first) plus the full actual payload for audit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MismatchReport {
    pub context: ReportContext,
    pub differences: Vec<Difference>,
    pub actual: Value,
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context {
            ReportContext::Response => writeln!(f, "Assertion failed. Differences found at:")?,
            ReportContext::ErrorResponse => {
                writeln!(f, "Assertion failed. Differences found in error response:")?
            }
        }
        for diff in &self.differences {
            writeln!(f, "{}", diff)?;
        }
        Ok(())
    }
}

/// Combined error type for the assertion entry points.
#[derive(Clone, Debug)]
pub enum AssertError {
    /// The fixture catalog could not produce the expected response.
    Catalog(CatalogError),
    /// The actual payload is not valid JSON; `raw` echoes the offending bytes.
    Body { message: String, raw: String },
    /// A formatted SDK error string carried no line with a JSON body.
    NoJsonFragment { message: String },
    /// The payload parsed but does not match the expected fixture.
    Mismatch(MismatchReport),
}

impl fmt::Display for AssertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertError::Catalog(e) => write!(f, "failed to get expected response: {}", e),
            AssertError::Body { message, raw } => {
                write!(f, "failed to parse response JSON: {}\nRaw body: {}", message, raw)
            }
            AssertError::NoJsonFragment { message } => {
                write!(f, "no JSON fragment found in error message: {}", message)
            }
            AssertError::Mismatch(report) => write!(f, "{}", report),
        }
    }
}

impl std::error::Error for AssertError {}
