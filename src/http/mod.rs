//! HTTP Layer
//!
//! Maps routes onto the handlers and turns their [`HandlerResponse`]s into
//! HTTP responses: HTML pages (or JSON), `303` redirects, navigation
//! scripts, and the flash cookie that carries messages across a redirect.
//!
//! [`HandlerResponse`]: crate::handlers::HandlerResponse

mod endpoints;
mod error;
pub mod flash;
mod respond;
pub mod views;

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{TodoItemsHandler, TodoListsHandler};
use crate::repository::{DbState, TodoItemRepository, TodoItemStore, TodoListRepository, TodoListStore};

pub use error::AppError;

/// Shared state for every route
#[derive(Clone)]
pub struct AppState {
    pub todo_lists: TodoListsHandler,
    pub todo_items: TodoItemsHandler,
}

impl AppState {
    pub fn new(lists: Arc<dyn TodoListStore>, items: Arc<dyn TodoItemStore>) -> Self {
        Self {
            todo_lists: TodoListsHandler::new(lists.clone()),
            todo_items: TodoItemsHandler::new(lists, items),
        }
    }

    /// State backed by the SQLite repositories
    pub fn from_db(db: &DbState) -> Self {
        let lists: Arc<dyn TodoListStore> = Arc::new(TodoListRepository::new(db.conn.clone()));
        let items: Arc<dyn TodoItemStore> = Arc::new(TodoItemRepository::new(db.conn.clone()));
        Self::new(lists, items)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(endpoints::lists_index))
        .route(
            "/todo_lists",
            get(endpoints::lists_index).post(endpoints::lists_create),
        )
        .route("/todo_lists/new", get(endpoints::lists_new))
        .route(
            "/todo_lists/{todo_list_id}",
            get(endpoints::lists_show)
                .put(endpoints::lists_update)
                .patch(endpoints::lists_update)
                .delete(endpoints::lists_destroy)
                .post(endpoints::lists_override),
        )
        .route("/todo_lists/{todo_list_id}/edit", get(endpoints::lists_edit))
        .route(
            "/todo_lists/{todo_list_id}/todo_items",
            get(endpoints::items_index).post(endpoints::items_create),
        )
        .route("/todo_lists/{todo_list_id}/todo_items/new", get(endpoints::items_new))
        .route(
            "/todo_lists/{todo_list_id}/todo_items/{id}",
            put(endpoints::items_update)
                .patch(endpoints::items_update)
                .delete(endpoints::items_destroy)
                .post(endpoints::items_override),
        )
        .route(
            "/todo_lists/{todo_list_id}/todo_items/{id}/edit",
            get(endpoints::items_edit),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
