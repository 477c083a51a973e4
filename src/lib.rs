//! Fixture-driven assertion engine for payment API conformance suites.
//!
//! Sandbox conformance tests drive every case from a JSON catalog: each entry
//! pairs a sample request with the response the sandbox is expected to
//! return. This crate owns the response side of that loop:
//!
//! ```text
//! Catalog::open(path) → catalog.response(title, case)
//!                     → resolve_placeholders(expected, vars)
//!                     → compare_values(expected, actual) → Vec<Difference>
//! ```
//!
//! [`assert_response`] and [`assert_fail_response`] compose the pipeline for
//! the success path and the error path, returning the parsed payload on a
//! match and a [`MismatchReport`] carrying every difference otherwise.
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let vars = HashMap::from([
//!     ("partnerReferenceNo".to_string(), json!("ref-20250901-0001")),
//! ]);
//! let expected = fixassert::resolve_placeholders(
//!     &json!({
//!         "responseCode": "2005400",
//!         "responseMessage": "Successful",
//!         "partnerReferenceNo": "${partnerReferenceNo}",
//!         "referenceNo": "${valueFromServer}",
//!     }),
//!     &vars,
//! );
//! let actual = json!({
//!     "responseCode": "2005400",
//!     "responseMessage": "Successful",
//!     "partnerReferenceNo": "ref-20250901-0001",
//!     "referenceNo": "1231000285220250901",
//!     "additionalInfo": {},
//! });
//! assert!(fixassert::compare_values(&expected, &actual).is_empty());
//! ```
//!
//! # Placeholders
//!
//! | Placeholder          | Meaning |
//! |----------------------|---------|
//! | `${name}`            | Replaced by `vars["name"]` before comparison; the replacement may be any JSON type. |
//! | `${valueFromServer}` | Never substituted. The field must be present in the actual payload, and non-empty when it is a string. |

pub mod assertion;
pub mod catalog;
pub mod compare;
pub mod error;
pub mod extract;
pub mod stamp;
pub mod substitute;

pub use error::*;

// Re-export entry-point functions at the crate root for convenience.
pub use assertion::{ErrorInfo, assert_fail_response, assert_response};
pub use catalog::{Catalog, apply_merchant_id};
pub use compare::{VALUE_FROM_SERVER, compare_values};
pub use extract::string_at;
pub use substitute::{VarMap, placeholder_name, resolve_placeholders};
