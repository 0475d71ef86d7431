//! The `Todo` record and its create payload.

use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a [`Todo`].
///
/// Serialized as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A persisted todo item.
///
/// ```json
/// { "id": 1, "title": "Buy milk", "isComplete": false }
/// ```
///
/// `title` is optional here because the storage column is nullable; rows
/// written through the API always carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Identifier assigned by the store on creation. Never changes.
    pub id: TodoId,
    /// What needs doing.
    pub title: Option<String>,
    /// Whether it has been done.
    pub is_complete: bool,
}

/// Body of a create request, as received.
///
/// Every member is optional on the wire. An `id` sent by the caller is
/// ignored: the store always assigns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPayload {
    /// Title of the item; required by [`validate`](Self::validate).
    #[serde(default)]
    pub title: Option<String>,
    /// Completion flag; `false` when absent.
    #[serde(default)]
    pub is_complete: bool,
}

impl TodoPayload {
    /// Payload with a title and the completion flag left at its default.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            is_complete: false,
        }
    }

    /// Check required fields and produce a [`NewTodo`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] with a `Title` entry if the title is
    /// absent, empty, or whitespace only.
    pub fn validate(self) -> Result<NewTodo, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("Title", self.title.as_deref());
        errors.into_result()?;

        Ok(NewTodo {
            title: self.title.unwrap_or_default(),
            is_complete: self.is_complete,
        })
    }
}

/// A validated todo that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    /// Non-blank title.
    pub title: String,
    /// Completion flag.
    pub is_complete: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_todo_wire_shape() {
        let todo = Todo {
            id: TodoId(7),
            title: Some("A".to_string()),
            is_complete: false,
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 7, "title": "A", "isComplete": false })
        );
    }

    #[test]
    fn test_todo_null_title_round_trips() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":3,"title":null,"isComplete":true}"#).unwrap();
        assert_eq!(todo.title, None);
        assert!(todo.is_complete);
    }

    #[test]
    fn test_payload_defaults_is_complete_to_false() {
        let payload: TodoPayload = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        let new_todo = payload.validate().unwrap();
        assert_eq!(new_todo.title, "Buy milk");
        assert!(!new_todo.is_complete);
    }

    #[test]
    fn test_payload_ignores_client_id() {
        let payload: TodoPayload =
            serde_json::from_str(r#"{"id":99,"title":"A","isComplete":true}"#).unwrap();
        assert_eq!(
            payload,
            TodoPayload {
                title: Some("A".to_string()),
                is_complete: true,
            }
        );
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let payload: TodoPayload = serde_json::from_str(r#"{"isComplete":true}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        assert_eq!(
            errors.fields().get("Title").map(Vec::as_slice),
            Some(&["The Title field is required.".to_string()][..])
        );
    }

    #[test]
    fn test_empty_title_is_rejected() {
        assert!(TodoPayload::titled("").validate().is_err());
        assert!(TodoPayload::titled(" \t\n").validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_title_with_visible_text_is_accepted(title in "\\s*[a-zA-Z0-9]+[ a-zA-Z0-9]*") {
            let new_todo = TodoPayload::titled(title.clone()).validate();
            prop_assert_eq!(new_todo.map(|t| t.title), Ok(title));
        }

        #[test]
        fn prop_blank_title_is_rejected(title in "[ \\t\\r\\n]*") {
            prop_assert!(TodoPayload::titled(title).validate().is_err());
        }
    }
}
