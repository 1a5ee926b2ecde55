//! TodoList Repository Module

mod todo_list_repo;

pub use todo_list_repo::TodoListRepository;
