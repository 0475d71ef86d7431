//! Axum middleware for request tracking and error rendering.
//!
//! This module provides:
//! - **Correlation ID tracking**: extract or generate an `X-Correlation-ID`,
//!   run the request inside a span carrying it, echo it on the response
//! - **Developer error detail**: in development, replace the generic detail
//!   of a 500 problem with the text of the error that caused it
//! - **Panic rendering**: turn a handler panic into the 500 problem document
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use todo_api_web::middleware::correlation_id_layer;
//!
//! let app = Router::new()
//!     .route("/api/todos", get(list_todos))
//!     .layer(correlation_id_layer());
//! ```

use crate::environment::Environment;
use crate::error::{problem_response, ErrorDetail, GENERIC_ERROR_DETAIL};
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::any::Any;
use std::task::{Context, Poll};
use todo_api_core::problem::{ProblemDetails, SERVER_ERROR_TITLE};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Create a layer that adds correlation ID tracking to all requests.
///
/// This layer:
/// - Extracts correlation ID from request header or generates new UUID
/// - Stores correlation ID in request extensions
/// - Creates tracing span with `correlation_id` field
/// - Injects correlation ID into response header
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Middleware service for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if let Ok(header_value) = HeaderValue::from_str(&correlation_id.to_string()) {
                response
                    .headers_mut()
                    .insert(CORRELATION_ID_HEADER, header_value);
            }

            Ok(response)
        })
    }
}

/// Surface the cause of a 500 in development.
///
/// Install with `axum::middleware::from_fn_with_state(environment, ...)`.
/// Outside development the response passes through untouched.
pub async fn expose_error_detail(
    State(environment): State<Environment>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if !environment.is_development() {
        return response;
    }

    match response.extensions().get::<ErrorDetail>() {
        Some(ErrorDetail(detail)) => {
            let problem = ProblemDetails::new(response.status().as_u16(), SERVER_ERROR_TITLE)
                .with_detail(detail.clone());
            problem_response(&problem)
        }
        None => response,
    }
}

/// Build the response for a panicking handler.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
#[must_use]
pub fn panic_response(environment: Environment, panic: &(dyn Any + Send)) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("handler panicked");

    tracing::error!(panic = %message, "Handler panicked");

    let detail = if environment.is_development() {
        message
    } else {
        GENERIC_ERROR_DETAIL
    };

    problem_response(&ProblemDetails::new(500, SERVER_ERROR_TITLE).with_detail(detail))
}
