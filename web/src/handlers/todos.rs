//! Todo endpoints.
//!
//! - GET    /api/todos      - List all todos
//! - GET    /api/todos/:id  - Get one todo
//! - POST   /api/todos      - Create a todo
//! - DELETE /todos/:id      - Delete a todo
//!
//! The delete route and the `Location` header of a create live outside the
//! `/api` prefix; clients depend on both paths as they are.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::state::AppState;
use crate::WebResult;
use axum::{
    extract::State,
    http::{header, StatusCode},
    Json,
};
use todo_api_core::{Todo, TodoId, TodoPayload, TodoRepository};

/// List all todos.
///
/// # Example
///
/// ```bash
/// curl http://localhost:5000/api/todos
/// # [{"id":1,"title":"Buy milk","isComplete":false}]
/// ```
///
/// # Errors
///
/// Returns a 500 problem if the store cannot be queried.
pub async fn list_todos<R: TodoRepository>(
    State(state): State<AppState<R>>,
) -> WebResult<Json<Vec<Todo>>> {
    let todos = state.todos.list().await?;
    tracing::info!(count = todos.len(), "Found {} records", todos.len());

    Ok(Json(todos))
}

/// Get one todo by id.
///
/// # Errors
///
/// - 400 if the id is not an integer
/// - 404 if no todo has that id
/// - 500 if the store cannot be queried
pub async fn get_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<Todo>> {
    let id = TodoId(id);

    match state.todos.find(id).await? {
        Some(todo) => Ok(Json(todo)),
        None => {
            tracing::debug!(%id, "Todo not found");
            Err(AppError::not_found("Todo", id))
        }
    }
}

/// Create a todo.
///
/// Responds `201 Created` with the stored todo and a `Location` of
/// `/todos/{id}`.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:5000/api/todos \
///   -H "Content-Type: application/json" \
///   -d '{"title":"Buy milk"}'
/// # {"id":1,"title":"Buy milk","isComplete":false}
/// ```
///
/// # Errors
///
/// - 400 validation problem if the title is missing or blank
/// - 400 if the body is not valid JSON for a todo
/// - 500 if the write fails
pub async fn create_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    ApiJson(payload): ApiJson<TodoPayload>,
) -> WebResult<(StatusCode, [(header::HeaderName, String); 1], Json<Todo>)> {
    let new_todo = payload.validate().map_err(|errors| {
        tracing::debug!(?errors, "Rejected todo");
        AppError::validation(&errors)
    })?;

    let todo = state.todos.insert(new_todo).await?;
    metrics::counter!("todos.created").increment(1);
    tracing::info!(id = %todo.id, "Created todo");

    let location = format!("/todos/{}", todo.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(todo)))
}

/// Delete a todo, returning its last value.
///
/// # Errors
///
/// - 400 if the id is not an integer
/// - 404 if no todo has that id
/// - 500 if the write fails
pub async fn delete_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    ApiPath(id): ApiPath<i64>,
) -> WebResult<Json<Todo>> {
    let id = TodoId(id);

    match state.todos.remove(id).await? {
        Some(todo) => {
            metrics::counter!("todos.deleted").increment(1);
            tracing::info!(%id, "Deleted todo");
            Ok(Json(todo))
        }
        None => {
            tracing::debug!(%id, "Todo not found");
            Err(AppError::not_found("Todo", id))
        }
    }
}
