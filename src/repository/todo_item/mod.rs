//! TodoItem Repository Module
//!
//! - todo_item_repo: Core CRUD operations
//! - todo_item_list: Operations scoped to one list

mod todo_item_list;
mod todo_item_repo;

pub use todo_item_repo::TodoItemRepository;
