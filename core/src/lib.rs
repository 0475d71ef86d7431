//! # Todo API Core
//!
//! Domain types shared by every crate in the workspace.
//!
//! This crate provides:
//! - [`Todo`]: the persisted record and its wire shape
//! - [`TodoPayload`] / [`NewTodo`]: the create request before and after validation
//! - [`TodoRepository`]: the seam between HTTP handlers and the relational store
//! - [`StoreError`]: failures the store can report
//! - [`ProblemDetails`]: the RFC 7807 error body used on the wire
//!
//! ## Example
//!
//! ```
//! use todo_api_core::TodoPayload;
//!
//! let payload = TodoPayload::titled("Buy milk");
//! let new_todo = payload.validate().expect("title is present");
//! assert_eq!(new_todo.title, "Buy milk");
//! assert!(!new_todo.is_complete);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod problem;
pub mod repository;
pub mod todo;
pub mod validation;

pub use error::{Result, StoreError};
pub use problem::ProblemDetails;
pub use repository::TodoRepository;
pub use todo::{NewTodo, Todo, TodoId, TodoPayload};
pub use validation::ValidationErrors;
