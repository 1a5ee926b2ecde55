//! TodoItem Repository - Core CRUD Operations
//!
//! SQLite-backed implementation of `Repository<TodoItem>`.
//! List-scoped queries are in todo_item_list.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, TodoItem};
use crate::repository::db::{connection, now_millis, to_id, SharedConnection};
use crate::repository::traits::Repository;

pub(super) const SELECT_ITEM: &str =
    "SELECT id, todo_list_id, content, position, created_at, updated_at FROM todo_items";

/// SQLite implementation of TodoItem repository
pub struct TodoItemRepository {
    pub(super) conn: SharedConnection,
}

impl TodoItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<TodoItem> for TodoItemRepository {
    /// Append the item after the last item of its list
    async fn create(&self, entity: &TodoItem) -> DomainResult<TodoItem> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        // Calculate position in same connection
        let position: i32 = conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM todo_items WHERE todo_list_id = ?",
            params![entity.todo_list_id],
            |row| row.get(0),
        )?;

        let now = now_millis();
        conn.execute(
            "INSERT INTO todo_items (todo_list_id, content, position, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![entity.todo_list_id, entity.content, position, now, now],
        )?;

        let mut item = entity.clone();
        item.id = to_id(conn.last_insert_rowid())?;
        item.position = position;
        item.created_at = Some(now);
        item.updated_at = Some(now);
        Ok(item)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<TodoItem>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let item = conn
            .query_row(&format!("{} WHERE id = ?", SELECT_ITEM), params![id], row_to_item)
            .optional()?;
        Ok(item)
    }

    async fn list(&self) -> DomainResult<Vec<TodoItem>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY todo_list_id, position, id", SELECT_ITEM))?;
        let items = stmt
            .query_map([], row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Persist the content; list and position never change after creation
    async fn update(&self, entity: &TodoItem) -> DomainResult<TodoItem> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let now = now_millis();
        let changed = conn.execute(
            "UPDATE todo_items SET content = ?, updated_at = ? WHERE id = ?",
            params![entity.content, now, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Todo item {} not found", entity.id)));
        }

        let mut item = entity.clone();
        item.updated_at = Some(now);
        Ok(item)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let deleted = conn.execute("DELETE FROM todo_items WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!("Todo item {} not found", id)));
        }
        Ok(())
    }
}

/// Convert a database row to TodoItem
pub(super) fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<TodoItem> {
    Ok(TodoItem {
        id: row.get(0)?,
        todo_list_id: row.get(1)?,
        content: row.get(2)?,
        position: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
