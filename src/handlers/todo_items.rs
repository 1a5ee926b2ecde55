//! TodoItems Handler
//!
//! Every action resolves the parent list first. A missing list sends the
//! user to the new-list form, except `destroy`, which answers with a
//! navigation script back to the (possibly nonexistent) list's items.

use std::fmt::Display;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{FlashMessage, HandlerResponse, View};
use crate::domain::{DomainError, DomainResult, TodoItem};
use crate::repository::{Removal, TodoItemStore, TodoListStore};
use crate::routes;

pub const ITEM_ADDED: &str = "Added todo list item.";
pub const ADD_FAILED: &str = "There was a problem adding that todo list item.";
pub const ITEM_SAVED: &str = "Saved todo list item.";
pub const SAVE_FAILED: &str = "That todo item could not be saved.";
pub const ITEM_REMOVED: &str = "Your todo item was successfully removed.";
pub const LAST_ITEM_REMOVED: &str =
    "The last todo item was successfully removed and your todo list was deleted.";
pub const DELETE_FAILED: &str = "Sorry, there was a problem deleting the todo item.";

/// Failures of `destroy`; both end in the same error response
#[derive(Debug, thiserror::Error)]
enum DeleteError {
    #[error("todo list {0} not found")]
    ParentNotFound(u32),
    #[error("todo item could not be deleted: {0}")]
    DeleteFailure(#[from] DomainError),
}

#[derive(Clone)]
pub struct TodoItemsHandler {
    lists: Arc<dyn TodoListStore>,
    items: Arc<dyn TodoItemStore>,
}

impl TodoItemsHandler {
    pub fn new(lists: Arc<dyn TodoListStore>, items: Arc<dyn TodoItemStore>) -> Self {
        Self { lists, items }
    }

    /// GET /todo_lists/{todo_list_id}/todo_items
    pub async fn index(&self, todo_list_id: u32) -> DomainResult<HandlerResponse> {
        let Some(list) = self.lists.find_by_id(todo_list_id).await? else {
            return Ok(list_not_found(todo_list_id));
        };

        let items = self.items.list_by_list(list.id).await?;
        Ok(HandlerResponse::render(View::TodoItemsIndex { list, items }))
    }

    /// GET /todo_lists/{todo_list_id}/todo_items/new
    pub async fn new_item(&self, todo_list_id: u32) -> DomainResult<HandlerResponse> {
        let Some(list) = self.lists.find_by_id(todo_list_id).await? else {
            return Ok(list_not_found(todo_list_id));
        };

        Ok(HandlerResponse::render(View::NewTodoItem {
            list,
            content: String::new(),
            errors: Vec::new(),
        }))
    }

    /// GET /todo_lists/{todo_list_id}/todo_items/{id}/edit
    pub async fn edit(&self, todo_list_id: u32, id: u32) -> DomainResult<HandlerResponse> {
        let Some(list) = self.lists.find_by_id(todo_list_id).await? else {
            return Ok(list_not_found(todo_list_id));
        };
        let Some(item) = self.items.find_in_list(list.id, id).await? else {
            return Ok(HandlerResponse::not_found());
        };

        Ok(HandlerResponse::render(View::EditTodoItem {
            list,
            item,
            errors: Vec::new(),
        }))
    }

    /// POST /todo_lists/{todo_list_id}/todo_items
    ///
    /// Nothing is written unless the list exists and the content is present.
    pub async fn create(&self, todo_list_id: u32, content: &str) -> DomainResult<HandlerResponse> {
        let Some(list) = self.lists.find_by_id(todo_list_id).await? else {
            return Ok(list_not_found(todo_list_id));
        };

        let item = match TodoItem::from_input(list.id, content) {
            Ok(item) => item,
            Err(DomainError::InvalidInput(reason)) => {
                return Ok(HandlerResponse::render(View::NewTodoItem {
                    list,
                    content: content.to_string(),
                    errors: vec![reason],
                })
                .with_flash(FlashMessage::error(ADD_FAILED)));
            }
            Err(e) => return Err(e),
        };

        let created = self.items.create(&item).await?;
        info!(todo_list_id = list.id, todo_item_id = created.id, "todo item created");

        Ok(HandlerResponse::redirect(routes::todo_items_path(list.id))
            .with_flash(FlashMessage::success(ITEM_ADDED)))
    }

    /// PUT /todo_lists/{todo_list_id}/todo_items/{id}
    ///
    /// A missing `content` keeps the current content.
    pub async fn update(
        &self,
        todo_list_id: u32,
        id: u32,
        content: Option<&str>,
    ) -> DomainResult<HandlerResponse> {
        let Some(list) = self.lists.find_by_id(todo_list_id).await? else {
            return Ok(list_not_found(todo_list_id));
        };
        let Some(mut item) = self.items.find_in_list(list.id, id).await? else {
            return Ok(HandlerResponse::not_found());
        };

        if let Some(content) = content {
            match item.set_content(content) {
                Ok(()) => {}
                Err(DomainError::InvalidInput(reason)) => {
                    item.content = content.to_string();
                    return Ok(HandlerResponse::render(View::EditTodoItem {
                        list,
                        item,
                        errors: vec![reason],
                    })
                    .with_flash(FlashMessage::error(SAVE_FAILED)));
                }
                Err(e) => return Err(e),
            }
        }

        self.items.update(&item).await?;
        info!(todo_list_id = list.id, todo_item_id = item.id, "todo item updated");

        Ok(HandlerResponse::redirect(routes::todo_items_path(list.id))
            .with_flash(FlashMessage::success(ITEM_SAVED)))
    }

    /// DELETE /todo_lists/{todo_list_id}/todo_items/{id}
    ///
    /// Never fails: any error becomes a navigation script back to the
    /// list's items with an error flash.
    pub async fn destroy(&self, todo_list_id: u32, id: u32) -> HandlerResponse {
        match self.remove_item(todo_list_id, id).await {
            Ok(Removal::ItemRemoved) => HandlerResponse::navigate(routes::root_path())
                .with_flash(FlashMessage::success(ITEM_REMOVED)),
            Ok(Removal::ListDeleted) => HandlerResponse::navigate(routes::root_path())
                .with_flash(FlashMessage::success(LAST_ITEM_REMOVED)),
            Err(e) => {
                warn!(todo_list_id, todo_item_id = id, error = %e, "todo item delete failed");
                delete_failed(routes::todo_items_path(todo_list_id))
            }
        }
    }

    /// DELETE with a list or item id that is not a number
    ///
    /// Answers like any failed delete, pointing back at the list segment as
    /// it was requested.
    pub fn destroy_unknown(&self, todo_list_id: &str, id: &str) -> HandlerResponse {
        warn!(todo_list_id, todo_item_id = id, "todo item delete failed: unknown id");
        delete_failed(routes::todo_items_path_for(todo_list_id))
    }

    /// Any action on a list id that is not a number
    pub fn unknown_list(&self, todo_list_id: &str) -> HandlerResponse {
        list_not_found(todo_list_id)
    }

    /// Edit or update of an item id that is not a number
    pub async fn unknown_item(&self, todo_list_id: u32) -> DomainResult<HandlerResponse> {
        if self.lists.find_by_id(todo_list_id).await?.is_none() {
            return Ok(list_not_found(todo_list_id));
        }
        Ok(HandlerResponse::not_found())
    }

    async fn remove_item(&self, todo_list_id: u32, id: u32) -> Result<Removal, DeleteError> {
        let list = self
            .lists
            .find_by_id(todo_list_id)
            .await?
            .ok_or(DeleteError::ParentNotFound(todo_list_id))?;

        // Cascade-on-empty: the list goes with its last item
        let removal = self.items.delete_and_prune(list.id, id).await?;
        info!(todo_list_id = list.id, todo_item_id = id, ?removal, "todo item deleted");

        Ok(removal)
    }
}

fn list_not_found(todo_list_id: impl Display) -> HandlerResponse {
    debug!(%todo_list_id, "todo list not found, redirecting to new list form");
    HandlerResponse::redirect(routes::new_todo_list_path())
}

fn delete_failed(path: String) -> HandlerResponse {
    HandlerResponse::navigate(path).with_flash(FlashMessage::error(DELETE_FAILED))
}
