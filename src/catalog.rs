//! Fixture catalog loading and case lookup.
//!
//! A catalog is one JSON file per API component, keyed
//! `{title: {case: {"request": ..., "response": ...}}}`, e.g.
//! `PaymentGateway.json` holding `CreateOrder.CreateOrderRedirect`. Catalogs
//! are opened per test invocation and passed by reference; lookups never
//! mutate the document, so one open catalog can serve a whole suite.

use crate::error::{CatalogError, CatalogErrorKind};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A loaded fixture catalog.
#[derive(Clone, Debug)]
pub struct Catalog {
    path: PathBuf,
    titles: Map<String, Value>,
}

impl Catalog {
    /// Reads and parses a catalog file. The root must be a JSON object.
    pub fn open(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError {
            kind: CatalogErrorKind::Io,
            message: format!("failed to read catalog {}: {}", path.display(), e),
        })?;
        let root: Value = serde_json::from_str(&content).map_err(|e| CatalogError {
            kind: CatalogErrorKind::Json,
            message: format!("failed to parse catalog {}: {}", path.display(), e),
        })?;
        match root {
            Value::Object(titles) => Ok(Catalog { path: path.to_path_buf(), titles }),
            _ => Err(CatalogError {
                kind: CatalogErrorKind::Json,
                message: format!("catalog root is not a JSON object: {}", path.display()),
            }),
        }
    }

    /// The path this catalog was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The sample request for a case.
    pub fn request(&self, title: &str, case: &str) -> Result<Value, CatalogError> {
        self.section(title, case, "request")
    }

    /// The expected response for a case, still carrying its placeholders.
    pub fn response(&self, title: &str, case: &str) -> Result<Value, CatalogError> {
        self.section(title, case, "response")
    }

    fn section(&self, title: &str, case: &str, section: &str) -> Result<Value, CatalogError> {
        let title_map = match self.titles.get(title) {
            Some(Value::Object(map)) => map,
            _ => {
                return Err(CatalogError {
                    kind: CatalogErrorKind::TitleNotFound,
                    message: format!("title {} not found in {}", title, self.path.display()),
                });
            }
        };
        let case_map = match title_map.get(case) {
            Some(Value::Object(map)) => map,
            _ => {
                return Err(CatalogError {
                    kind: CatalogErrorKind::CaseNotFound,
                    message: format!("case {} not found in {}", case, title),
                });
            }
        };
        match case_map.get(section) {
            Some(value @ Value::Object(_)) => Ok(value.clone()),
            _ => Err(CatalogError {
                kind: CatalogErrorKind::SectionNotFound,
                message: format!("case {} has no {} object", case, section),
            }),
        }
    }
}

/// Overlays the environment's merchant id onto a sample request, under both
/// spellings the catalogs use (`merchantId` and `mid`).
///
/// A fixture value that is an empty string is a deliberate invalid-field
/// payload and is kept as-is; any other value, string or not, is replaced.
/// Absent keys are never inserted.
pub fn apply_merchant_id(request: &mut Value, merchant_id: &str) {
    if let Some(map) = request.as_object_mut() {
        for key in ["merchantId", "mid"] {
            if let Some(current) = map.get_mut(key)
                && !matches!(current, Value::String(s) if s.is_empty())
            {
                *current = Value::String(merchant_id.to_string());
            }
        }
    }
}
