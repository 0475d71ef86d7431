//! Router configuration for the Todo API.
//!
//! Builds the complete Axum router with all endpoints and layers.

use crate::environment::Environment;
use crate::error::AppError;
use crate::handlers::{
    create_todo, delete_todo, error_page, get_todo, health_check, hello_world, list_todos,
    readiness_check,
};
use crate::middleware::{correlation_id_layer, expose_error_detail, panic_response};
use crate::state::AppState;
use axum::{
    http::Uri,
    middleware::from_fn_with_state,
    routing::{delete, get},
    Router,
};
use std::any::Any;
use todo_api_core::TodoRepository;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// Configures:
/// - `/api/todos` list/get/create
/// - `DELETE /todos/:id`
/// - `/` greeting and `/error` problem
/// - `/health` and `/ready` probes
/// - A problem-document fallback for unknown routes
///
/// Layers, outermost first: correlation id, request tracing, panic capture,
/// development error detail.
///
/// # Arguments
///
/// - `state`: Application state to share with handlers
pub fn build_router<R: TodoRepository>(state: AppState<R>) -> Router {
    let environment = state.environment;

    let api_routes = Router::new()
        .route("/todos", get(list_todos::<R>).post(create_todo::<R>))
        .route("/todos/:id", get(get_todo::<R>));

    Router::new()
        .route("/", get(hello_world))
        .route("/error", get(error_page))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check::<R>))
        .route("/todos/:id", delete(delete_todo::<R>))
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .with_state(state)
        .layer(from_fn_with_state(environment, expose_error_detail))
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| panic_response(environment, panic.as_ref()),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}

#[allow(clippy::unused_async)]
async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found("Route", uri.path())
}
