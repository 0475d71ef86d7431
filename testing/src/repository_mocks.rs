//! In-memory repository implementations.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use todo_api_core::{NewTodo, Result, StoreError, Todo, TodoId, TodoRepository};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<TodoId, Todo>,
    last_id: i64,
}

/// In-memory todo repository for fast, deterministic tests.
///
/// Ids start at 1, increase by one per insert, and are never handed out
/// again after a delete.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryTodoRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().map_or(0, |t| t.rows.len())
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory table lock poisoned".to_string())
}

impl TodoRepository for InMemoryTodoRepository {
    fn list(&self) -> impl Future<Output = Result<Vec<Todo>>> + Send {
        let table = Arc::clone(&self.table);

        async move {
            let table = table.read().map_err(|_| poisoned())?;
            Ok(table.rows.values().cloned().collect())
        }
    }

    fn find(&self, id: TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send {
        let table = Arc::clone(&self.table);

        async move {
            let table = table.read().map_err(|_| poisoned())?;
            Ok(table.rows.get(&id).cloned())
        }
    }

    fn insert(&self, todo: NewTodo) -> impl Future<Output = Result<Todo>> + Send {
        let table = Arc::clone(&self.table);

        async move {
            let mut table = table.write().map_err(|_| poisoned())?;
            table.last_id += 1;

            let todo = Todo {
                id: TodoId(table.last_id),
                title: Some(todo.title),
                is_complete: todo.is_complete,
            };
            table.rows.insert(todo.id, todo.clone());
            Ok(todo)
        }
    }

    fn remove(&self, id: TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send {
        let table = Arc::clone(&self.table);

        async move {
            let mut table = table.write().map_err(|_| poisoned())?;
            Ok(table.rows.remove(&id))
        }
    }

    fn ping(&self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }
}

/// A repository whose store is never reachable.
///
/// Every call fails with [`StoreError::Unavailable`] carrying the configured
/// message.
#[derive(Clone, Debug)]
pub struct FailingTodoRepository {
    message: String,
}

impl FailingTodoRepository {
    /// Fail every call with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail<T: Send>(&self) -> impl Future<Output = Result<T>> + Send {
        let message = self.message.clone();
        async move { Err(StoreError::Unavailable(message)) }
    }
}

impl Default for FailingTodoRepository {
    fn default() -> Self {
        Self::new("database is locked")
    }
}

impl TodoRepository for FailingTodoRepository {
    fn list(&self) -> impl Future<Output = Result<Vec<Todo>>> + Send {
        self.fail()
    }

    fn find(&self, _id: TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send {
        self.fail()
    }

    fn insert(&self, _todo: NewTodo) -> impl Future<Output = Result<Todo>> + Send {
        self.fail()
    }

    fn remove(&self, _id: TodoId) -> impl Future<Output = Result<Option<Todo>>> + Send {
        self.fail()
    }

    fn ping(&self) -> impl Future<Output = Result<()>> + Send {
        self.fail()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            is_complete: false,
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_and_not_reused() {
        let repo = InMemoryTodoRepository::new();

        let a = repo.insert(new_todo("A")).await.unwrap();
        let b = repo.insert(new_todo("B")).await.unwrap();
        assert_eq!(a.id, TodoId(1));
        assert_eq!(b.id, TodoId(2));

        repo.remove(b.id).await.unwrap();
        let c = repo.insert(new_todo("C")).await.unwrap();
        assert_eq!(c.id, TodoId(3));
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_missing_is_none() {
        let repo = InMemoryTodoRepository::new();
        assert_eq!(repo.remove(TodoId(1)).await.unwrap(), None);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_failing_repository_fails_everything() {
        let repo = FailingTodoRepository::new("offline");

        assert_eq!(
            repo.list().await.unwrap_err(),
            StoreError::Unavailable("offline".to_string())
        );
        assert!(repo.find(TodoId(1)).await.is_err());
        assert!(repo.insert(new_todo("A")).await.is_err());
        assert!(repo.remove(TodoId(1)).await.is_err());
        assert!(repo.ping().await.is_err());
    }
}
