//! Root and error endpoints.

use crate::error::{AppError, GENERIC_ERROR_DETAIL};

/// Greeting at `/`.
#[allow(clippy::unused_async)]
pub async fn hello_world() -> &'static str {
    "Hello World!"
}

/// Fixed 500 problem at `/error`.
///
/// Internal route for error-page redirects; not part of the public API.
///
/// # Errors
///
/// Always returns the generic server error problem.
#[allow(clippy::unused_async)]
pub async fn error_page() -> Result<(), AppError> {
    Err(AppError::internal(GENERIC_ERROR_DETAIL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_hello_world() {
        assert_eq!(hello_world().await, "Hello World!");
    }

    #[tokio::test]
    async fn test_error_page_is_500() {
        let err = error_page().await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.problem().detail.as_deref(), Some("An error occurred."));
    }
}
