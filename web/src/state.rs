//! Application state for Axum handlers.

use crate::environment::Environment;
use axum::extract::FromRef;
use todo_api_core::TodoRepository;

/// Application state shared across all HTTP handlers.
///
/// Built once at startup and handed to the router; handlers receive a
/// clone per request. Cloning is cheap as long as the repository is a
/// pooled handle.
///
/// # Examples
///
/// ```ignore
/// use todo_api_web::{AppState, Environment};
///
/// let state = AppState::new(repo, Environment::Production);
/// let app = todo_api_web::build_router(state);
/// ```
#[derive(Clone, Debug)]
pub struct AppState<R> {
    /// Todo store handle.
    pub todos: R,
    /// Hosting environment, for error verbosity.
    pub environment: Environment,
}

impl<R: TodoRepository> AppState<R> {
    /// Create a new application state.
    #[must_use]
    pub const fn new(todos: R, environment: Environment) -> Self {
        Self { todos, environment }
    }
}

impl<R: Clone> FromRef<AppState<R>> for Environment {
    fn from_ref(state: &AppState<R>) -> Self {
        state.environment
    }
}
