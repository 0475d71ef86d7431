//! Repository trait for todo persistence.

use crate::error::Result;
use crate::todo::{NewTodo, Todo, TodoId};
use std::future::Future;

/// Todo repository.
///
/// This trait abstracts over the relational store. Each method is a single
/// round-trip and a single implicit transaction; there is no update path.
///
/// Implementations must assign ids monotonically and never hand out an id
/// that belonged to a deleted row.
pub trait TodoRepository: Clone + Send + Sync + 'static {
    /// All todos, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be queried.
    fn list(&self) -> impl Future<Output = Result<Vec<Todo>>> + Send;

    /// Look up one todo.
    ///
    /// Returns `Ok(None)` if no row has that id.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be queried.
    fn find(&self, id: TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send;

    /// Persist a new todo and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    fn insert(&self, todo: NewTodo) -> impl Future<Output = Result<Todo>> + Send;

    /// Delete one todo and return its last value.
    ///
    /// Returns `Ok(None)` if no row has that id.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    fn remove(&self, id: TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send;

    /// Cheap round-trip used by readiness checks.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;
}
