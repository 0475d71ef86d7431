//! Axum HTTP surface for the Todo API.
//!
//! This crate maps the todo contract onto HTTP. Handlers are thin: each one
//! extracts its input, makes at most one call on the [`TodoRepository`] held
//! in [`AppState`], and maps the result to a status code.
//!
//! # Routes
//!
//! ```text
//! GET    /api/todos        200 [Todo]
//! GET    /api/todos/:id    200 Todo | 404
//! POST   /api/todos        201 Todo, Location: /todos/:id | 400 validation problem
//! DELETE /todos/:id        200 Todo | 404
//! GET    /                 200 "Hello World!"
//! GET    /error            500 problem
//! GET    /health           200 liveness
//! GET    /ready            200 | 503 store readiness
//! ```
//!
//! # Example
//!
//! ```ignore
//! use todo_api_web::{build_router, AppState, Environment};
//!
//! let state = AppState::new(repo, Environment::Production);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, build_router(state)).await?;
//! ```
//!
//! [`TodoRepository`]: todo_api_core::TodoRepository

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod environment;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use environment::{Environment, UnknownEnvironment};
pub use error::AppError;
pub use extractors::{ApiJson, ApiPath};
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
