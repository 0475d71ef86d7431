//! RFC 7807 problem documents.
//!
//! Shared by the service (which writes them) and the client (which reads
//! them back), so the error body has a single definition.

use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Media type of a serialized [`ProblemDetails`].
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Title used for every validation problem.
pub const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

/// Title used for every 500 problem.
pub const SERVER_ERROR_TITLE: &str = "An error occurred while processing your request.";

/// An RFC 7807 problem document.
///
/// ```json
/// {
///   "type": "https://tools.ietf.org/html/rfc7231#section-6.5.1",
///   "title": "One or more validation errors occurred.",
///   "status": 400,
///   "errors": { "Title": ["The Title field is required."] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI identifying the problem type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short summary of the problem type.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Explanation specific to this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Field-level validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ProblemDetails {
    /// Problem for `status` with the standard type URI for that status.
    #[must_use]
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            kind: type_uri(status).to_string(),
            title: title.into(),
            status,
            detail: None,
            errors: None,
        }
    }

    /// Attach an occurrence-specific explanation.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// 400 problem listing field failures.
    #[must_use]
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            errors: Some(errors.fields().clone()),
            ..Self::new(400, VALIDATION_TITLE)
        }
    }
}

/// RFC section describing each status; `about:blank` otherwise.
const fn type_uri(status: u16) -> &'static str {
    match status {
        400 => "https://tools.ietf.org/html/rfc7231#section-6.5.1",
        404 => "https://tools.ietf.org/html/rfc7231#section-6.5.4",
        405 => "https://tools.ietf.org/html/rfc7231#section-6.5.5",
        415 => "https://tools.ietf.org/html/rfc7231#section-6.5.13",
        500 => "https://tools.ietf.org/html/rfc7231#section-6.6.1",
        503 => "https://tools.ietf.org/html/rfc7231#section-6.6.4",
        _ => "about:blank",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_problem_shape() {
        let mut errors = ValidationErrors::new();
        errors.require_text("Title", None);

        let json = serde_json::to_value(ProblemDetails::validation(&errors)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "https://tools.ietf.org/html/rfc7231#section-6.5.1",
                "title": "One or more validation errors occurred.",
                "status": 400,
                "errors": { "Title": ["The Title field is required."] }
            })
        );
    }

    #[test]
    fn test_optional_members_are_omitted() {
        let json = serde_json::to_value(ProblemDetails::new(418, "Teapot")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "about:blank", "title": "Teapot", "status": 418 })
        );
    }

    #[test]
    fn test_server_error_with_detail() {
        let problem = ProblemDetails::new(500, SERVER_ERROR_TITLE).with_detail("An error occurred.");
        assert_eq!(problem.kind, "https://tools.ietf.org/html/rfc7231#section-6.6.1");
        assert_eq!(problem.detail.as_deref(), Some("An error occurred."));
    }
}
