//! SQLite todo repository implementation.
//!
//! All statements are single round-trips. Writes use `RETURNING` so the row
//! handed back is exactly what the store holds.

use crate::connection::ConnectionString;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use todo_api_core::{NewTodo, Result, StoreError, Todo, TodoId, TodoRepository};

/// Row shape of the `Todos` table.
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    #[sqlx(rename = "Id")]
    id: i64,
    #[sqlx(rename = "Title")]
    title: Option<String>,
    #[sqlx(rename = "IsComplete")]
    is_complete: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: TodoId(row.id),
            title: row.title,
            is_complete: row.is_complete,
        }
    }
}

/// Map a sqlx error onto the store taxonomy.
fn store_error(context: &str, e: &sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(format!("{context}: {e}"))
        }
        _ => StoreError::Query(format!("{context}: {e}")),
    }
}

/// SQLite todo repository.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    /// SQLite connection pool.
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    /// Wrap an existing pool.
    ///
    /// # Arguments
    ///
    /// * `pool` - SQLite connection pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for the given connection string.
    ///
    /// In-memory databases are pinned to a single long-lived connection,
    /// since the data disappears with the last connection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the database cannot be opened.
    pub async fn connect(connection: &ConnectionString, max_connections: u32) -> Result<Self> {
        let pool_options = if connection.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(connection.options().clone())
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to open database: {e}")))?;

        Ok(Self::new(pool))
    }

    /// Run database migrations.
    ///
    /// Idempotent: already-applied migrations are skipped.
    ///
    /// # Errors
    ///
    /// Returns error if migrations fail.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Open the database, creating it if needed, and bring the schema up to
    /// date. Intended to run once, before the service accepts traffic.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or migrated.
    pub async fn ensure(connection: &ConnectionString, max_connections: u32) -> Result<Self> {
        tracing::info!(
            connection_string = %connection,
            "Ensuring database exists and is up to date"
        );

        let repo = Self::connect(connection, max_connections).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl TodoRepository for SqliteTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"SELECT "Id", "Title", "IsComplete" FROM "Todos" ORDER BY "Id""#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list todos", &e))?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn find(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"SELECT "Id", "Title", "IsComplete" FROM "Todos" WHERE "Id" = ?"#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to get todo", &e))?;

        Ok(row.map(Todo::from))
    }

    async fn insert(&self, todo: NewTodo) -> Result<Todo> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO "Todos" ("Title", "IsComplete")
            VALUES (?, ?)
            RETURNING "Id", "Title", "IsComplete"
            "#,
        )
        .bind(&todo.title)
        .bind(todo.is_complete)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create todo", &e))?;

        tracing::debug!(id = row.id, "Inserted todo");
        Ok(row.into())
    }

    async fn remove(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            DELETE FROM "Todos"
            WHERE "Id" = ?
            RETURNING "Id", "Title", "IsComplete"
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to delete todo", &e))?;

        if row.is_some() {
            tracing::debug!(%id, "Deleted todo");
        }
        Ok(row.map(Todo::from))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Ping failed", &e))?;
        Ok(())
    }
}
