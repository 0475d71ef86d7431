//! Client side of the Todo API.
//!
//! [`TodoClient`] is a typed wrapper over the HTTP contract and compiles on
//! every target. With the `web` feature the crate also provides the Dioxus
//! browser shell ([`app::App`]), which builds a client for the page's origin.
//!
//! # Example
//!
//! ```ignore
//! use todo_api_client::TodoClient;
//! use todo_api_core::TodoPayload;
//!
//! let client = TodoClient::new("http://localhost:5000")?;
//! let todo = client.create(&TodoPayload::titled("Buy milk")).await?;
//! assert_eq!(client.get(todo.id).await?, Some(todo));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod client;
pub mod error;

#[cfg(feature = "web")]
pub mod app;

pub use client::TodoClient;
pub use error::ClientError;
