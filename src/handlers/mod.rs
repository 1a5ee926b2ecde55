//! Handlers Layer
//!
//! Request handlers for the todo lists and todo items resources. A handler
//! never touches HTTP: it takes ids and form values, calls the stores, and
//! returns a [`HandlerResponse`] describing what to send back.

mod todo_items;
mod todo_lists;

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::domain::{TodoItem, TodoList};

pub use todo_items::TodoItemsHandler;
pub use todo_lists::TodoListsHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "success" => Some(FlashKind::Success),
            "error" => Some(FlashKind::Error),
            _ => None,
        }
    }
}

/// One-shot status message shown to the user after the response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }
}

/// Page to render, with everything it displays
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    TodoListsIndex {
        lists: Vec<TodoList>,
    },
    NewTodoList {
        title: String,
        description: String,
        errors: Vec<String>,
    },
    EditTodoList {
        list: TodoList,
        errors: Vec<String>,
    },
    TodoItemsIndex {
        list: TodoList,
        items: Vec<TodoItem>,
    },
    NewTodoItem {
        list: TodoList,
        content: String,
        errors: Vec<String>,
    },
    EditTodoItem {
        list: TodoList,
        item: TodoItem,
        errors: Vec<String>,
    },
}

impl View {
    /// Template name within the resource: `index`, `new` or `edit`
    pub fn template(&self) -> &'static str {
        match self {
            View::TodoListsIndex { .. } | View::TodoItemsIndex { .. } => "index",
            View::NewTodoList { .. } | View::NewTodoItem { .. } => "new",
            View::EditTodoList { .. } | View::EditTodoItem { .. } => "edit",
        }
    }

    /// The list the page is about, if any
    pub fn todo_list(&self) -> Option<&TodoList> {
        match self {
            View::TodoListsIndex { .. } | View::NewTodoList { .. } => None,
            View::EditTodoList { list, .. }
            | View::TodoItemsIndex { list, .. }
            | View::NewTodoItem { list, .. }
            | View::EditTodoItem { list, .. } => Some(list),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(View),
    Redirect(String),
    /// Client-side navigation script pointing at the path
    Navigate(String),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub outcome: Outcome,
    pub flash: Option<FlashMessage>,
}

impl HandlerResponse {
    pub fn render(view: View) -> Self {
        Self {
            outcome: Outcome::Render(view),
            flash: None,
        }
    }

    pub fn redirect(path: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Redirect(path.into()),
            flash: None,
        }
    }

    pub fn navigate(path: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Navigate(path.into()),
            flash: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            outcome: Outcome::NotFound,
            flash: None,
        }
    }

    pub fn with_flash(mut self, flash: FlashMessage) -> Self {
        self.flash = Some(flash);
        self
    }

    /// Redirect target, if this is a redirect
    pub fn redirect_location(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Redirect(path) => Some(path),
            _ => None,
        }
    }

    /// Rendered view, if this renders one
    pub fn view(&self) -> Option<&View> {
        match &self.outcome {
            Outcome::Render(view) => Some(view),
            _ => None,
        }
    }
}

/// Body of a navigation script response
pub fn navigation_script(path: &str) -> String {
    format!("window.location = '{}';", path.replace('\\', "\\\\").replace('\'', "\\'"))
}
