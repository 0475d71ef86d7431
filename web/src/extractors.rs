//! Custom Axum extractors.
//!
//! Thin wrappers over Axum's `Json` and `Path` whose rejections are
//! problem documents instead of plain-text bodies:
//! - `ApiJson`: request body; syntax or type errors are 400
//! - `ApiPath`: path parameters; unparsable values are 400
//!
//! # Examples
//!
//! ```ignore
//! use todo_api_web::extractors::{ApiJson, ApiPath};
//!
//! async fn handler(
//!     ApiPath(id): ApiPath<i64>,
//!     ApiJson(payload): ApiJson<TodoPayload>,
//! ) -> Result<Json<Todo>, AppError> {
//!     ...
//! }
//! ```

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

/// JSON request body with problem-document rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(&rejection)),
        }
    }
}

fn json_rejection(rejection: &JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::unsupported_media_type(rejection.body_text())
        }
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            AppError::bad_request(rejection.body_text())
        }
        _ => AppError::new(rejection.status(), "Bad Request").with_detail(rejection.body_text()),
    }
}

/// Path parameters with problem-document rejections.
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection(&rejection)),
        }
    }
}

fn path_rejection(rejection: &PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(_) => {
            AppError::bad_request(rejection.body_text())
        }
        _ => AppError::internal(rejection.body_text()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/items",
                post(|ApiJson(body): ApiJson<Named>| async move { body.name }),
            )
            .route(
                "/items/:id",
                get(|ApiPath(id): ApiPath<i64>| async move { id.to_string() }),
            )
    }

    async fn send(request: axum::http::Request<Body>) -> axum::response::Response {
        app().oneshot(request).await.unwrap().into_response()
    }

    #[tokio::test]
    async fn test_json_accepts_valid_body() {
        let response = send(
            axum::http::Request::post("/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"x"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_json_syntax_error_is_problem_400() {
        let response = send(
            axum::http::Request::post("/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }

    #[tokio::test]
    async fn test_json_type_error_is_400() {
        let response = send(
            axum::http::Request::post("/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":5}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_without_content_type_is_415() {
        let response = send(
            axum::http::Request::post("/items")
                .body(Body::from(r#"{"name":"x"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_path_non_integer_is_400() {
        let response = send(
            axum::http::Request::get("/items/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            axum::http::Request::get("/items/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
