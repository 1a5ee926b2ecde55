//! TodoList Entity
//!
//! Parent aggregate. Its items live in the item store and are listed
//! in insertion order.

use serde::{Deserialize, Serialize};

use super::entity::{require_present, DomainResult, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl TodoList {
    /// Create an unsaved list (id assigned by the store)
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: 0,
            title,
            description,
            created_at: None,
            updated_at: None,
        }
    }

    /// Build a list from raw form input; the title must be present
    pub fn from_input(title: &str, description: &str) -> DomainResult<Self> {
        let title = require_present("Title", title)?;
        Ok(Self::new(title, description.trim().to_string()))
    }

    /// Apply edited fields, keeping the current value for missing ones
    pub fn apply(&mut self, title: Option<&str>, description: Option<&str>) -> DomainResult<()> {
        if let Some(title) = title {
            self.title = require_present("Title", title)?;
        }
        if let Some(description) = description {
            self.description = description.trim().to_string();
        }
        Ok(())
    }
}

impl Entity for TodoList {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
