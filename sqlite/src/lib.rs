//! SQLite todo store for the Todo API.
//!
//! This crate provides the production [`TodoRepository`] implementation. It
//! uses sqlx runtime queries against a single `Todos` table and supports:
//!
//! - Connection strings in URL form (`sqlite://todos.db`) or key/value form
//!   (`Data Source=../todos.db`)
//! - Creating the database file on first start
//! - Embedded schema migrations
//! - Connection pooling
//!
//! # Example
//!
//! ```no_run
//! use todo_api_sqlite::{ConnectionString, SqliteTodoRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection: ConnectionString = "Data Source=../todos.db".parse()?;
//! let repo = SqliteTodoRepository::ensure(&connection, 5).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`TodoRepository`]: todo_api_core::TodoRepository

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod connection;
pub mod repository;

pub use connection::{ConnectionString, ConnectionStringError};
pub use repository::SqliteTodoRepository;
