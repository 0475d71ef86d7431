//! Browser shell: the root component and its children.

use crate::{ClientError, TodoClient};
use dioxus::prelude::*;
use todo_api_core::{Todo, TodoId, TodoPayload};

const STYLE: &str = r#"
    body { font-family: sans-serif; max-width: 600px; margin: 40px auto; padding: 0 20px; }
    .add-form { display: flex; gap: 8px; margin-bottom: 20px; }
    .add-form input { flex: 1; padding: 8px; font-size: 14px; border: 1px solid #ccc; border-radius: 4px; }
    .todo-list { list-style: none; padding: 0; }
    .todo-item { display: flex; align-items: center; gap: 8px; padding: 8px 0; border-bottom: 1px solid #eee; }
    .todo-item span { flex: 1; }
    .todo-item span.completed { text-decoration: line-through; color: #999; }
    .error { color: #c0392b; }
    .empty { color: #999; font-style: italic; }
"#;

/// Origin of the hosting page, e.g. `http://localhost:5000`.
async fn page_origin() -> Result<String, String> {
    document::eval("return window.location.origin;")
        .join::<String>()
        .await
        .map_err(|e| e.to_string())
}

/// Root component. Resolves the page origin, then hands a [`TodoClient`]
/// for it to the rest of the tree.
#[component]
pub fn App() -> Element {
    let client = use_resource(|| async {
        page_origin()
            .await
            .and_then(|origin| TodoClient::new(&origin).map_err(|e| e.to_string()))
    });

    rsx! {
        style { {STYLE} }
        h1 { "Todos" }
        {match &*client.read() {
            Some(Ok(client)) => rsx! { TodoBoard { client: client.clone() } },
            Some(Err(e)) => rsx! { p { class: "error", "{e}" } },
            None => rsx! { p { "Loading..." } },
        }}
    }
}

#[component]
fn TodoBoard(client: TodoClient) -> Element {
    let list_client = client.clone();
    let mut todos = use_resource(move || {
        let client = list_client.clone();
        async move { client.list().await }
    });

    rsx! {
        AddTodoForm { client: client.clone(), on_added: move |()| todos.restart() }
        ul { class: "todo-list",
            {match &*todos.read() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    li { class: "empty", "Nothing to do." }
                },
                Some(Ok(list)) => rsx! {
                    for todo in list.iter() {
                        TodoItem {
                            key: "{todo.id}",
                            client: client.clone(),
                            todo: todo.clone(),
                            on_deleted: move |()| todos.restart(),
                        }
                    }
                },
                Some(Err(e)) => rsx! { li { class: "error", "{e}" } },
                None => rsx! { li { "Loading..." } },
            }}
        }
    }
}

#[component]
fn AddTodoForm(client: TodoClient, on_added: EventHandler<()>) -> Element {
    let mut input = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let payload = TodoPayload::titled(input.read().trim());
        let client = client.clone();
        spawn(async move {
            match client.create(&payload).await {
                Ok(todo) => {
                    tracing::debug!(id = %todo.id, "Todo created");
                    input.set(String::new());
                    error.set(None);
                    on_added.call(());
                }
                Err(e @ ClientError::Validation(_)) => {
                    let message = e
                        .field_errors("Title")
                        .first()
                        .cloned()
                        .unwrap_or_else(|| e.to_string());
                    error.set(Some(message));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create todo");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        form { class: "add-form", onsubmit: on_submit,
            input {
                r#type: "text",
                placeholder: "What needs to be done?",
                value: "{input}",
                oninput: move |evt| input.set(evt.value()),
            }
            button { r#type: "submit", "Add" }
        }
        if let Some(message) = error() {
            p { class: "error", "{message}" }
        }
    }
}

#[component]
fn TodoItem(client: TodoClient, todo: Todo, on_deleted: EventHandler<()>) -> Element {
    let id: TodoId = todo.id;
    let title = todo.title.clone().unwrap_or_default();

    let delete = move |_| {
        let client = client.clone();
        spawn(async move {
            match client.delete(id).await {
                Ok(_) => on_deleted.call(()),
                Err(e) => tracing::error!(error = %e, %id, "Failed to delete todo"),
            }
        });
    };

    rsx! {
        li { class: "todo-item",
            span {
                class: if todo.is_complete { "completed" } else { "" },
                "{title}"
            }
            button { onclick: delete, "Delete" }
        }
    }
}
