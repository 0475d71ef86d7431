//! Error types for web handlers.
//!
//! This module defines the error type that bridges domain errors and HTTP
//! responses. Every error leaves the service as an RFC 7807 problem document
//! (`application/problem+json`).

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::BTreeMap;
use std::fmt;
use todo_api_core::problem::{ProblemDetails, PROBLEM_JSON, SERVER_ERROR_TITLE};
use todo_api_core::{StoreError, ValidationErrors};

/// Detail shown to callers for server errors outside development.
pub const GENERIC_ERROR_DETAIL: &str = "An error occurred.";

/// Full text of the error behind a 5xx response.
///
/// Attached to the response extensions so the development-only middleware
/// can surface it; never serialized on its own.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

/// Application error type for web handlers.
///
/// Implements Axum's `IntoResponse`, so handlers can return
/// `Result<T, AppError>` and use `?` on store calls.
///
/// # Examples
///
/// ```ignore
/// async fn handler(State(state): State<AppState<R>>) -> Result<Json<Todo>, AppError> {
///     let todo = state.todos.find(id).await?
///         .ok_or_else(|| AppError::not_found("Todo", id))?;
///     Ok(Json(todo))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Problem title (user-facing)
    title: String,
    /// Occurrence-specific explanation (user-facing)
    detail: Option<String>,
    /// Field-level validation failures
    errors: Option<BTreeMap<String, Vec<String>>>,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            detail: None,
            errors: None,
            source: None,
        }
    }

    /// Attach an explanation for this occurrence.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request").with_detail(detail)
    }

    /// Create a 400 validation problem listing the failed fields.
    #[must_use]
    pub fn validation(errors: &ValidationErrors) -> Self {
        let problem = ProblemDetails::validation(errors);
        Self {
            errors: problem.errors,
            ..Self::new(StatusCode::BAD_REQUEST, problem.title)
        }
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found")
            .with_detail(format!("{resource} with id {id} not found"))
    }

    /// Create a 415 Unsupported Media Type error.
    #[must_use]
    pub fn unsupported_media_type(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type")
            .with_detail(detail)
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_TITLE).with_detail(detail)
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Problem document this error renders as.
    #[must_use]
    pub fn problem(&self) -> ProblemDetails {
        ProblemDetails {
            detail: self.detail.clone(),
            errors: self.errors.clone(),
            ..ProblemDetails::new(self.status.as_u16(), self.title.clone())
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "[{}] {}: {detail}", self.status.as_u16(), self.title),
            None => write!(f, "[{}] {}", self.status.as_u16(), self.title),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Render a problem document with the problem media type.
pub(crate) fn problem_response(problem: &ProblemDetails) -> Response {
    let status =
        StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON))],
        Json(problem),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = self.problem();

        // Log internal errors
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    title = %self.title,
                    error = %format!("{source:#}"),
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    title = %self.title,
                    "Internal server error"
                );
            }
        }

        let mut response = problem_response(&problem);

        if self.status.is_server_error() {
            if let Some(source) = self.source {
                response
                    .extensions_mut()
                    .insert(ErrorDetail(format!("{source:#}")));
            }
        }

        response
    }
}

/// Store failures are never the caller's fault.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(GENERIC_ERROR_DETAIL).with_source(err.into())
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(GENERIC_ERROR_DETAIL).with_source(err)
    }
}
