//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by concern.

pub mod health;
pub mod root;
pub mod todos;

// Re-export common handler utilities
pub use health::{health_check, readiness_check};
pub use root::{error_page, hello_world};
pub use todos::{create_todo, delete_todo, get_todo, list_todos};
