//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage or HTTP dependencies.

mod entity;
mod todo_item;
mod todo_list;

pub use entity::{DomainError, DomainResult, Entity};
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
