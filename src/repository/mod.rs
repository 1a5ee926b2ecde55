//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod db;
mod todo_item;
mod todo_list;
mod traits;


pub use db::{init_db, DbState, SharedConnection};
pub use todo_item::TodoItemRepository;
pub use todo_list::TodoListRepository;
pub use traits::{Removal, Repository, TodoItemListOperations, TodoItemStore, TodoListStore};
