//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! The handlers only ever see these traits.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity, TodoItem, TodoList};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity, returning it with its assigned ID
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID (`NotFound` when nothing was deleted)
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Operations on the ordered item collection of one list
#[async_trait]
pub trait TodoItemListOperations: Send + Sync {
    /// Items of a list in insertion order
    async fn list_by_list(&self, todo_list_id: u32) -> DomainResult<Vec<TodoItem>>;

    /// Number of items left in a list
    async fn count_by_list(&self, todo_list_id: u32) -> DomainResult<usize>;

    /// Find an item only if it belongs to the given list
    async fn find_in_list(&self, todo_list_id: u32, id: u32) -> DomainResult<Option<TodoItem>>;

    /// Delete an item of the list, and the list too once it is empty.
    ///
    /// Both deletes commit together. `NotFound` when the item is not in the list.
    async fn delete_and_prune(&self, todo_list_id: u32, id: u32) -> DomainResult<Removal>;
}

/// What deleting an item did to its list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    ItemRemoved,
    ListDeleted,
}

/// Store for todo lists (deleting a list deletes its items)
pub trait TodoListStore: Repository<TodoList> {}

impl<T: Repository<TodoList>> TodoListStore for T {}

/// Store for todo items; `create` appends at the end of the item's list
pub trait TodoItemStore: Repository<TodoItem> + TodoItemListOperations {}

impl<T: Repository<TodoItem> + TodoItemListOperations> TodoItemStore for T {}
