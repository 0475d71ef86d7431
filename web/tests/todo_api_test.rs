//! HTTP contract tests for the todo endpoints.
//!
//! Drive the full router (layers included) through `axum-test` against the
//! in-memory repository, so every test starts from an empty store.

#![allow(clippy::expect_used, clippy::unwrap_used)] // Integration tests can use expect for setup

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use std::future::Future;
use todo_api_core::problem::ProblemDetails;
use todo_api_core::{NewTodo, Result, Todo, TodoId, TodoRepository};
use todo_api_testing::helpers::init_test_tracing;
use todo_api_testing::{FailingTodoRepository, InMemoryTodoRepository};
use todo_api_web::{build_router, AppState, Environment, CORRELATION_ID_HEADER};

fn server_with<R: TodoRepository>(repo: R, environment: Environment) -> TestServer {
    init_test_tracing();
    TestServer::new(build_router(AppState::new(repo, environment)))
        .expect("Failed to start test server")
}

fn server() -> TestServer {
    server_with(InMemoryTodoRepository::new(), Environment::Production)
}

#[tokio::test]
async fn test_full_lifecycle() {
    let server = server();

    let created = server.post("/api/todos").json(&json!({ "title": "A" })).await;
    created.assert_status(StatusCode::CREATED);
    created.assert_json(&json!({ "id": 1, "title": "A", "isComplete": false }));
    assert_eq!(created.header("location"), "/todos/1");

    let list = server.get("/api/todos").await;
    list.assert_status_ok();
    list.assert_json(&json!([{ "id": 1, "title": "A", "isComplete": false }]));

    let deleted = server.delete("/todos/1").await;
    deleted.assert_status_ok();
    deleted.assert_json(&json!({ "id": 1, "title": "A", "isComplete": false }));

    server.get("/api/todos/1").await.assert_status_not_found();
    server.delete("/todos/1").await.assert_status_not_found();
}

#[tokio::test]
async fn test_created_ids_are_unique_and_stable() {
    let server = server();
    let mut ids = Vec::new();

    for title in ["A", "B", "C"] {
        let todo: Todo = server
            .post("/api/todos")
            .json(&json!({ "title": title }))
            .await
            .json();
        ids.push(todo.id);
    }

    assert_eq!(ids, vec![TodoId(1), TodoId(2), TodoId(3)]);

    for (id, title) in ids.iter().zip(["A", "B", "C"]) {
        let fetched: Todo = server.get(&format!("/api/todos/{id}")).await.json();
        assert_eq!(fetched.id, *id);
        assert_eq!(fetched.title.as_deref(), Some(title));
    }
}

#[tokio::test]
async fn test_create_defaults_is_complete() {
    let todo: Todo = server()
        .post("/api/todos")
        .json(&json!({ "title": "Buy milk" }))
        .await
        .json();

    assert_eq!(todo.title.as_deref(), Some("Buy milk"));
    assert!(!todo.is_complete);
}

#[tokio::test]
async fn test_create_keeps_is_complete_and_ignores_client_id() {
    let response = server()
        .post("/api/todos")
        .json(&json!({ "id": 42, "title": "Done already", "isComplete": true }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({ "id": 1, "title": "Done already", "isComplete": true }));
}

#[tokio::test]
async fn test_create_without_title_is_validation_problem() {
    let server = server();

    for body in [json!({}), json!({ "title": null }), json!({ "title": "  " })] {
        let response = server.post("/api/todos").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.header("content-type"), "application/problem+json");

        let problem: ProblemDetails = response.json();
        assert_eq!(problem.title, "One or more validation errors occurred.");
        assert_eq!(
            problem.errors.unwrap().get("Title"),
            Some(&vec!["The Title field is required.".to_string()])
        );
    }

    server.get("/api/todos").await.assert_json(&json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let response = server()
        .post("/api/todos")
        .text("{\"title\":")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let problem: ProblemDetails = response.json();
    assert_eq!(problem.status, 400);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let server = server();

    let response = server.get("/api/todos/999").await;
    response.assert_status_not_found();
    let problem: ProblemDetails = response.json();
    assert_eq!(problem.detail.as_deref(), Some("Todo with id 999 not found"));

    server.delete("/todos/999").await.assert_status_not_found();
}

#[tokio::test]
async fn test_non_integer_id_is_bad_request() {
    let server = server();
    server
        .get("/api/todos/abc")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .delete("/todos/abc")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleted_ids_are_not_reused() {
    let server = server();

    server.post("/api/todos").json(&json!({ "title": "A" })).await;
    server.delete("/todos/1").await.assert_status_ok();

    let second: Todo = server
        .post("/api/todos")
        .json(&json!({ "title": "B" }))
        .await
        .json();
    assert_eq!(second.id, TodoId(2));
}

#[tokio::test]
async fn test_store_failure_hides_detail_in_production() {
    let server = server_with(FailingTodoRepository::new("disk I/O error"), Environment::Production);

    let response = server.get("/api/todos").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "type": "https://tools.ietf.org/html/rfc7231#section-6.6.1",
        "title": "An error occurred while processing your request.",
        "status": 500,
        "detail": "An error occurred."
    }));
}

#[tokio::test]
async fn test_store_failure_shows_detail_in_development() {
    let server = server_with(FailingTodoRepository::new("disk I/O error"), Environment::Development);

    let response = server
        .post("/api/todos")
        .json(&json!({ "title": "A" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let problem: ProblemDetails = response.json();
    assert_eq!(problem.detail.as_deref(), Some("Store unavailable: disk I/O error"));
}

#[tokio::test]
async fn test_validation_runs_before_store() {
    // A failing store must not turn a validation problem into a 500
    let server = server_with(FailingTodoRepository::default(), Environment::Production);

    server
        .post("/api/todos")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_responses_carry_correlation_id() {
    let response = server().get("/api/todos").await;
    let header = response.header(CORRELATION_ID_HEADER);
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

/// Repository whose `list` panics.
#[derive(Clone)]
struct PanickingTodoRepository;

impl TodoRepository for PanickingTodoRepository {
    fn list(&self) -> impl Future<Output = Result<Vec<Todo>>> + Send {
        async {
            let exploded = true;
            assert!(!exploded, "list exploded");
            Ok(Vec::new())
        }
    }

    fn find(&self, _id: TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send {
        async { Ok(None) }
    }

    fn insert(&self, _todo: NewTodo) -> impl Future<Output = Result<Todo>> + Send {
        async { Ok(Todo { id: TodoId(1), title: None, is_complete: false }) }
    }

    fn remove(&self, _id: TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send {
        async { Ok(None) }
    }

    fn ping(&self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }
}

#[tokio::test]
async fn test_handler_panic_becomes_problem() {
    let response = server_with(PanickingTodoRepository, Environment::Development)
        .get("/api/todos")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let problem: ProblemDetails = response.json();
    assert_eq!(problem.detail.as_deref(), Some("list exploded"));

    let response = server_with(PanickingTodoRepository, Environment::Production)
        .get("/api/todos")
        .await;
    let problem: ProblemDetails = response.json();
    assert_eq!(problem.detail.as_deref(), Some("An error occurred."));
}
