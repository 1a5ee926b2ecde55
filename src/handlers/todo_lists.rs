//! TodoLists Handler
//!
//! The parent resource: the root page lists every todo list, and the
//! new-list form is where the items handler sends unknown list ids.

use std::sync::Arc;

use tracing::info;

use super::{FlashMessage, HandlerResponse, View};
use crate::domain::{DomainError, DomainResult, TodoList};
use crate::repository::TodoListStore;
use crate::routes;

pub const LIST_CREATED: &str = "Todo list was successfully created.";
pub const LIST_UPDATED: &str = "Todo list was successfully updated.";
pub const LIST_DESTROYED: &str = "Todo list was successfully destroyed.";
pub const LIST_INVALID: &str = "There was a problem saving the todo list.";

#[derive(Clone)]
pub struct TodoListsHandler {
    lists: Arc<dyn TodoListStore>,
}

impl TodoListsHandler {
    pub fn new(lists: Arc<dyn TodoListStore>) -> Self {
        Self { lists }
    }

    /// GET / and GET /todo_lists
    pub async fn index(&self) -> DomainResult<HandlerResponse> {
        let lists = self.lists.list().await?;
        Ok(HandlerResponse::render(View::TodoListsIndex { lists }))
    }

    /// GET /todo_lists/new
    pub fn new_list(&self) -> HandlerResponse {
        HandlerResponse::render(View::NewTodoList {
            title: String::new(),
            description: String::new(),
            errors: Vec::new(),
        })
    }

    /// POST /todo_lists
    pub async fn create(&self, title: &str, description: &str) -> DomainResult<HandlerResponse> {
        let list = match TodoList::from_input(title, description) {
            Ok(list) => list,
            Err(DomainError::InvalidInput(reason)) => {
                return Ok(HandlerResponse::render(View::NewTodoList {
                    title: title.to_string(),
                    description: description.to_string(),
                    errors: vec![reason],
                })
                .with_flash(FlashMessage::error(LIST_INVALID)));
            }
            Err(e) => return Err(e),
        };

        let created = self.lists.create(&list).await?;
        info!(todo_list_id = created.id, "todo list created");

        Ok(HandlerResponse::redirect(routes::todo_items_path(created.id))
            .with_flash(FlashMessage::success(LIST_CREATED)))
    }

    /// GET /todo_lists/{id}/edit
    pub async fn edit(&self, id: u32) -> DomainResult<HandlerResponse> {
        let Some(list) = self.lists.find_by_id(id).await? else {
            return Ok(HandlerResponse::redirect(routes::new_todo_list_path()));
        };

        Ok(HandlerResponse::render(View::EditTodoList {
            list,
            errors: Vec::new(),
        }))
    }

    /// Any member action on an id that is not a number
    pub fn unknown_list(&self) -> HandlerResponse {
        HandlerResponse::redirect(routes::new_todo_list_path())
    }

    /// PUT /todo_lists/{id}
    pub async fn update(
        &self,
        id: u32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> DomainResult<HandlerResponse> {
        let Some(mut list) = self.lists.find_by_id(id).await? else {
            return Ok(HandlerResponse::redirect(routes::new_todo_list_path()));
        };

        match list.apply(title, description) {
            Ok(()) => {}
            Err(DomainError::InvalidInput(reason)) => {
                if let Some(title) = title {
                    list.title = title.to_string();
                }
                return Ok(HandlerResponse::render(View::EditTodoList {
                    list,
                    errors: vec![reason],
                })
                .with_flash(FlashMessage::error(LIST_INVALID)));
            }
            Err(e) => return Err(e),
        }

        self.lists.update(&list).await?;
        info!(todo_list_id = list.id, "todo list updated");

        Ok(HandlerResponse::redirect(routes::root_path())
            .with_flash(FlashMessage::success(LIST_UPDATED)))
    }

    /// DELETE /todo_lists/{id}, removing its items as well
    pub async fn destroy(&self, id: u32) -> DomainResult<HandlerResponse> {
        if self.lists.find_by_id(id).await?.is_none() {
            return Ok(HandlerResponse::redirect(routes::new_todo_list_path()));
        }

        self.lists.delete(id).await?;
        info!(todo_list_id = id, "todo list deleted");

        Ok(HandlerResponse::redirect(routes::root_path())
            .with_flash(FlashMessage::success(LIST_DESTROYED)))
    }
}
