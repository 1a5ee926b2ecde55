//! TodoItem Entity
//!
//! A line of free text belonging to exactly one TodoList.

use serde::{Deserialize, Serialize};

use super::entity::{require_present, DomainResult, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u32,
    /// Owning list (back-reference, the list owns the collection)
    pub todo_list_id: u32,
    pub content: String,
    /// Insertion order within the list, 0-based
    pub position: i32,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl TodoItem {
    /// Create an unsaved item; the store assigns id and position
    pub fn new(todo_list_id: u32, content: String) -> Self {
        Self {
            id: 0,
            todo_list_id,
            content,
            position: 0,
            created_at: None,
            updated_at: None,
        }
    }

    /// Build an item from raw form input; the content must be present
    pub fn from_input(todo_list_id: u32, content: &str) -> DomainResult<Self> {
        let content = require_present("Content", content)?;
        Ok(Self::new(todo_list_id, content))
    }

    pub fn set_content(&mut self, content: &str) -> DomainResult<()> {
        self.content = require_present("Content", content)?;
        Ok(())
    }
}

impl Entity for TodoItem {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
