//! Handler Tests
//!
//! Run the handlers against an in-memory SQLite database.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rstest::rstest;

use super::todo_items::{
    ADD_FAILED, DELETE_FAILED, ITEM_ADDED, ITEM_REMOVED, ITEM_SAVED, LAST_ITEM_REMOVED, SAVE_FAILED,
};
use super::todo_lists::{LIST_CREATED, LIST_DESTROYED, LIST_INVALID, LIST_UPDATED};
use super::{FlashMessage, HandlerResponse, Outcome, TodoItemsHandler, TodoListsHandler, View};
use crate::domain::{DomainError, DomainResult, TodoItem, TodoList};
use crate::repository::{
    init_db, Removal, Repository, TodoItemListOperations, TodoItemRepository, TodoListRepository,
};

struct Fixture {
    handler: TodoItemsHandler,
    lists: Arc<TodoListRepository>,
    items: Arc<TodoItemRepository>,
    todo_list: TodoList,
    todo_item: TodoItem,
}

impl Fixture {
    async fn item_count(&self) -> usize {
        self.items.list().await.unwrap().len()
    }

    async fn add_list(&self, title: &str, contents: &[&str]) -> (TodoList, Vec<TodoItem>) {
        let list = self
            .lists
            .create(&TodoList::new(title.to_string(), "This is my test list".to_string()))
            .await
            .unwrap();
        let mut items = Vec::new();
        for content in contents {
            items.push(self.items.create(&TodoItem::new(list.id, content.to_string())).await.unwrap());
        }
        (list, items)
    }
}

/// A list "My Title" holding the single item "Get milk and eggs"
async fn fixture() -> Fixture {
    let db = init_db(Path::new(":memory:")).await.expect("Failed to init test DB");
    let lists = Arc::new(TodoListRepository::new(db.conn.clone()));
    let items = Arc::new(TodoItemRepository::new(db.conn.clone()));

    let todo_list = lists
        .create(&TodoList::new("My Title".to_string(), "This is my test list".to_string()))
        .await
        .unwrap();
    let todo_item = items
        .create(&TodoItem::new(todo_list.id, "Get milk and eggs".to_string()))
        .await
        .unwrap();

    Fixture {
        handler: TodoItemsHandler::new(lists.clone(), items.clone()),
        lists,
        items,
        todo_list,
        todo_item,
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Index,
    New,
    Edit,
    Create,
    Update,
}

async fn dispatch(handler: &TodoItemsHandler, action: Action, list_id: u32, item_id: u32) -> HandlerResponse {
    let result = match action {
        Action::Index => handler.index(list_id).await,
        Action::New => handler.new_item(list_id).await,
        Action::Edit => handler.edit(list_id, item_id).await,
        Action::Create => handler.create(list_id, "This is my new item").await,
        Action::Update => handler.update(list_id, item_id, Some("New content")).await,
    };
    result.expect("handler failed")
}

// ========================
// Missing parent list
// ========================

#[rstest]
#[case::index(Action::Index)]
#[case::new(Action::New)]
#[case::edit(Action::Edit)]
#[case::create(Action::Create)]
#[case::update(Action::Update)]
#[tokio::test]
async fn test_redirects_to_new_list_when_list_missing(#[case] action: Action) {
    let f = fixture().await;

    let response = dispatch(&f.handler, action, f.todo_list.id + 1, f.todo_item.id).await;

    assert_eq!(response.redirect_location(), Some("/todo_lists/new"));
    assert_eq!(response.flash, None);
}

#[rstest]
#[case::create(Action::Create)]
#[case::update(Action::Update)]
#[tokio::test]
async fn test_missing_list_does_not_mutate(#[case] action: Action) {
    let f = fixture().await;

    dispatch(&f.handler, action, f.todo_list.id + 1, f.todo_item.id).await;

    assert_eq!(f.item_count().await, 1);
    let item = f.items.find_by_id(f.todo_item.id).await.unwrap().unwrap();
    assert_eq!(item.content, "Get milk and eggs");
}

// ========================
// index / new / edit
// ========================

#[tokio::test]
async fn test_index_exposes_list_and_items() {
    let f = fixture().await;

    let response = f.handler.index(f.todo_list.id).await.unwrap();

    let view = response.view().expect("should render");
    assert_eq!(view.template(), "index");
    assert_eq!(view.todo_list(), Some(&f.todo_list));
    let View::TodoItemsIndex { items, .. } = view else {
        panic!("expected items index, got {:?}", view);
    };
    assert_eq!(items, &vec![f.todo_item.clone()]);
}

#[tokio::test]
async fn test_new_renders_empty_form() {
    let f = fixture().await;

    let response = f.handler.new_item(f.todo_list.id).await.unwrap();

    assert_eq!(
        response.outcome,
        Outcome::Render(View::NewTodoItem {
            list: f.todo_list.clone(),
            content: String::new(),
            errors: Vec::new(),
        })
    );
}

#[tokio::test]
async fn test_edit_renders_item_form() {
    let f = fixture().await;

    let response = f.handler.edit(f.todo_list.id, f.todo_item.id).await.unwrap();

    let view = response.view().expect("should render");
    assert_eq!(view.template(), "edit");
    assert!(matches!(view, View::EditTodoItem { item, .. } if item.id == f.todo_item.id));
}

#[tokio::test]
async fn test_edit_item_of_other_list_is_not_found() {
    let f = fixture().await;
    let (other, _) = f.add_list("Other", &["Elsewhere"]).await;

    let response = f.handler.edit(other.id, f.todo_item.id).await.unwrap();

    assert_eq!(response.outcome, Outcome::NotFound);
}

// ========================
// update
// ========================

#[tokio::test]
async fn test_update_redirects_to_index() {
    let f = fixture().await;

    let response = f
        .handler
        .update(f.todo_list.id, f.todo_item.id, Some(&f.todo_item.content))
        .await
        .unwrap();

    assert_eq!(
        response.redirect_location(),
        Some(format!("/todo_lists/{}/todo_items", f.todo_list.id).as_str())
    );
    assert_eq!(response.flash, Some(FlashMessage::success(ITEM_SAVED)));
}

#[tokio::test]
async fn test_update_changes_content() {
    let f = fixture().await;

    f.handler
        .update(f.todo_list.id, f.todo_item.id, Some("New content"))
        .await
        .unwrap();

    let reloaded = f.items.find_by_id(f.todo_item.id).await.unwrap().unwrap();
    assert_eq!(reloaded.content, "New content");
}

#[tokio::test]
async fn test_update_without_content_keeps_item() {
    let f = fixture().await;

    let response = f.handler.update(f.todo_list.id, f.todo_item.id, None).await.unwrap();

    assert!(response.redirect_location().is_some());
    let reloaded = f.items.find_by_id(f.todo_item.id).await.unwrap().unwrap();
    assert_eq!(reloaded.content, "Get milk and eggs");
}

#[tokio::test]
async fn test_update_with_blank_content_rerenders_edit() {
    let f = fixture().await;

    let response = f.handler.update(f.todo_list.id, f.todo_item.id, Some("  ")).await.unwrap();

    assert_eq!(response.view().map(View::template), Some("edit"));
    assert_eq!(response.flash, Some(FlashMessage::error(SAVE_FAILED)));
    let reloaded = f.items.find_by_id(f.todo_item.id).await.unwrap().unwrap();
    assert_eq!(reloaded.content, "Get milk and eggs");
}

// ========================
// create
// ========================

#[tokio::test]
async fn test_create_appends_item() {
    let f = fixture().await;

    let response = f
        .handler
        .create(f.todo_list.id, "This is my new item")
        .await
        .unwrap();

    let items = f.items.list_by_list(f.todo_list.id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].content, "This is my new item");
    assert_eq!(response.flash, Some(FlashMessage::success(ITEM_ADDED)));
    assert_eq!(
        response.redirect_location(),
        Some(format!("/todo_lists/{}/todo_items", f.todo_list.id).as_str())
    );
}

#[tokio::test]
async fn test_create_with_blank_content_rerenders_new() {
    let f = fixture().await;

    let response = f.handler.create(f.todo_list.id, "").await.unwrap();

    assert_eq!(response.view().map(View::template), Some("new"));
    assert_eq!(response.flash, Some(FlashMessage::error(ADD_FAILED)));
    assert_eq!(f.item_count().await, 1);
}

// ========================
// destroy
// ========================

#[tokio::test]
async fn test_destroy_deletes_item() {
    let f = fixture().await;

    f.handler.destroy(f.todo_list.id, f.todo_item.id).await;

    assert_eq!(f.item_count().await, 0);
}

#[tokio::test]
async fn test_destroy_navigates_to_root() {
    let f = fixture().await;

    let response = f.handler.destroy(f.todo_list.id, f.todo_item.id).await;

    assert_eq!(response.outcome, Outcome::Navigate("/".to_string()));
}

#[tokio::test]
async fn test_destroy_flashes_removed_when_items_remain() {
    let f = fixture().await;
    let (list, items) = f.add_list("My New List", &["Get on up", "Also get funky"]).await;

    let response = f.handler.destroy(list.id, items[0].id).await;

    assert_eq!(response.flash, Some(FlashMessage::success(ITEM_REMOVED)));
    assert_eq!(response.outcome, Outcome::Navigate("/".to_string()));
    assert!(f.lists.find_by_id(list.id).await.unwrap().is_some());
    assert_eq!(f.items.count_by_list(list.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_destroy_last_item_deletes_list() {
    let f = fixture().await;

    let response = f.handler.destroy(f.todo_list.id, f.todo_item.id).await;

    assert_eq!(response.flash, Some(FlashMessage::success(LAST_ITEM_REMOVED)));
    assert!(f.lists.find_by_id(f.todo_list.id).await.unwrap().is_none());
}

#[rstest]
#[case::missing_list_and_item(12345, 67890)]
#[case::missing_list(12345, 1)]
#[tokio::test]
async fn test_destroy_unknown_ids_flashes_error(#[case] list_id: u32, #[case] item_id: u32) {
    let f = fixture().await;

    let response = f.handler.destroy(list_id, item_id).await;

    assert_eq!(
        response.outcome,
        Outcome::Navigate(format!("/todo_lists/{}/todo_items", list_id))
    );
    assert_eq!(response.flash, Some(FlashMessage::error(DELETE_FAILED)));
    assert_eq!(f.item_count().await, 1);
}

#[tokio::test]
async fn test_destroy_unknown_item_in_existing_list() {
    let f = fixture().await;

    let response = f.handler.destroy(f.todo_list.id, 67890).await;

    assert_eq!(response.outcome, Outcome::Navigate(format!("/todo_lists/{}/todo_items", f.todo_list.id)));
    assert_eq!(response.flash, Some(FlashMessage::error(DELETE_FAILED)));
    assert!(f.lists.find_by_id(f.todo_list.id).await.unwrap().is_some());
}

#[rstest]
#[case::text("abc", "1", "/todo_lists/abc/todo_items")]
#[case::too_large_item("12345", "99999999999", "/todo_lists/12345/todo_items")]
#[case::quote("a'b", "1", "/todo_lists/a%27b/todo_items")]
#[tokio::test]
async fn test_destroy_non_numeric_ids_flashes_error(
    #[case] list_id: &str,
    #[case] item_id: &str,
    #[case] path: &str,
) {
    let f = fixture().await;

    let response = f.handler.destroy_unknown(list_id, item_id);

    assert_eq!(response.outcome, Outcome::Navigate(path.to_string()));
    assert_eq!(response.flash, Some(FlashMessage::error(DELETE_FAILED)));
    assert_eq!(f.item_count().await, 1);
}

#[tokio::test]
async fn test_unknown_list_redirects_to_new_list() {
    let f = fixture().await;

    let response = f.handler.unknown_list("abc");

    assert_eq!(response.redirect_location(), Some("/todo_lists/new"));
    assert_eq!(response.flash, None);
}

#[tokio::test]
async fn test_unknown_item_depends_on_list() {
    let f = fixture().await;

    let in_existing = f.handler.unknown_item(f.todo_list.id).await.unwrap();
    assert_eq!(in_existing.outcome, Outcome::NotFound);

    let in_missing = f.handler.unknown_item(f.todo_list.id + 1).await.unwrap();
    assert_eq!(in_missing.redirect_location(), Some("/todo_lists/new"));
}

/// Item store whose deletes always fail
struct BrokenDeletes(Arc<TodoItemRepository>);

#[async_trait]
impl Repository<TodoItem> for BrokenDeletes {
    async fn create(&self, entity: &TodoItem) -> DomainResult<TodoItem> {
        self.0.create(entity).await
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<TodoItem>> {
        self.0.find_by_id(id).await
    }

    async fn list(&self) -> DomainResult<Vec<TodoItem>> {
        self.0.list().await
    }

    async fn update(&self, entity: &TodoItem) -> DomainResult<TodoItem> {
        self.0.update(entity).await
    }

    async fn delete(&self, _id: u32) -> DomainResult<()> {
        Err(DomainError::Internal("disk I/O error".to_string()))
    }
}

#[async_trait]
impl TodoItemListOperations for BrokenDeletes {
    async fn list_by_list(&self, todo_list_id: u32) -> DomainResult<Vec<TodoItem>> {
        self.0.list_by_list(todo_list_id).await
    }

    async fn count_by_list(&self, todo_list_id: u32) -> DomainResult<usize> {
        self.0.count_by_list(todo_list_id).await
    }

    async fn find_in_list(&self, todo_list_id: u32, id: u32) -> DomainResult<Option<TodoItem>> {
        self.0.find_in_list(todo_list_id, id).await
    }

    async fn delete_and_prune(&self, _todo_list_id: u32, _id: u32) -> DomainResult<Removal> {
        Err(DomainError::Internal("disk I/O error".to_string()))
    }
}

#[tokio::test]
async fn test_destroy_storage_failure_is_handled() {
    let f = fixture().await;
    let handler = TodoItemsHandler::new(f.lists.clone(), Arc::new(BrokenDeletes(f.items.clone())));

    let response = handler.destroy(f.todo_list.id, f.todo_item.id).await;

    assert_eq!(response.outcome, Outcome::Navigate(format!("/todo_lists/{}/todo_items", f.todo_list.id)));
    assert_eq!(response.flash, Some(FlashMessage::error(DELETE_FAILED)));
    assert_eq!(f.item_count().await, 1);
}

// ========================
// Todo lists
// ========================

#[tokio::test]
async fn test_lists_index_renders_all_lists() {
    let f = fixture().await;
    f.add_list("Second", &[]).await;
    let handler = TodoListsHandler::new(f.lists.clone());

    let response = handler.index().await.unwrap();

    let Some(View::TodoListsIndex { lists }) = response.view() else {
        panic!("expected lists index");
    };
    assert_eq!(lists.len(), 2);
}

#[tokio::test]
async fn test_create_list_redirects_to_its_items() {
    let f = fixture().await;
    let handler = TodoListsHandler::new(f.lists.clone());

    let response = handler.create("Chores", "Around the house").await.unwrap();

    let all = f.lists.list().await.unwrap();
    let created = all.last().unwrap();
    assert_eq!(created.title, "Chores");
    assert_eq!(
        response.redirect_location(),
        Some(format!("/todo_lists/{}/todo_items", created.id).as_str())
    );
    assert_eq!(response.flash, Some(FlashMessage::success(LIST_CREATED)));
}

#[tokio::test]
async fn test_create_list_requires_title() {
    let f = fixture().await;
    let handler = TodoListsHandler::new(f.lists.clone());

    let response = handler.create(" ", "No title").await.unwrap();

    assert_eq!(response.view().map(View::template), Some("new"));
    assert_eq!(response.flash, Some(FlashMessage::error(LIST_INVALID)));
    assert_eq!(f.lists.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_list() {
    let f = fixture().await;
    let handler = TodoListsHandler::new(f.lists.clone());

    let response = handler
        .update(f.todo_list.id, Some("Renamed"), None)
        .await
        .unwrap();

    assert_eq!(response.redirect_location(), Some("/"));
    assert_eq!(response.flash, Some(FlashMessage::success(LIST_UPDATED)));
    let reloaded = f.lists.find_by_id(f.todo_list.id).await.unwrap().unwrap();
    assert_eq!(reloaded.title, "Renamed");
    assert_eq!(reloaded.description, "This is my test list");
}

#[tokio::test]
async fn test_edit_missing_list_redirects() {
    let f = fixture().await;
    let handler = TodoListsHandler::new(f.lists.clone());

    let response = handler.edit(f.todo_list.id + 1).await.unwrap();

    assert_eq!(response.redirect_location(), Some("/todo_lists/new"));
}

#[tokio::test]
async fn test_destroy_list_removes_items() {
    let f = fixture().await;
    let handler = TodoListsHandler::new(f.lists.clone());

    let response = handler.destroy(f.todo_list.id).await.unwrap();

    assert_eq!(response.flash, Some(FlashMessage::success(LIST_DESTROYED)));
    assert_eq!(f.item_count().await, 0);
}
