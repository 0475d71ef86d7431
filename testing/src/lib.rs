//! # Todo API Testing
//!
//! Testing utilities for the Todo API.
//!
//! This crate provides:
//! - [`InMemoryTodoRepository`]: a `BTreeMap`-backed store with the same id
//!   rules as the SQLite store
//! - [`FailingTodoRepository`]: a store that is always unreachable, for
//!   exercising 500 paths
//! - [`helpers::init_test_tracing`]: log capture for test runs
//!
//! ## Example
//!
//! ```
//! use todo_api_core::{TodoPayload, TodoRepository};
//! use todo_api_testing::InMemoryTodoRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = InMemoryTodoRepository::new();
//! let todo = repo.insert(TodoPayload::titled("A").validate()?).await?;
//! assert_eq!(repo.find(todo.id).await?, Some(todo));
//! # Ok(())
//! # }
//! ```

pub mod repository_mocks;

pub use repository_mocks::{FailingTodoRepository, InMemoryTodoRepository};

/// Test helpers.
pub mod helpers {
    /// Route `tracing` output through the test harness's captured stdout.
    ///
    /// Safe to call from every test; only the first call installs the
    /// subscriber. Honors `RUST_LOG`, defaulting to `debug`.
    pub fn init_test_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}
