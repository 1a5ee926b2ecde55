//! TodoList Repository - Core CRUD Operations
//!
//! SQLite-backed implementation of `Repository<TodoList>`.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, TodoList};
use crate::repository::db::{connection, connection_mut, now_millis, to_id, SharedConnection};
use crate::repository::traits::Repository;

const SELECT_LIST: &str = "SELECT id, title, description, created_at, updated_at FROM todo_lists";

/// SQLite implementation of TodoList repository
pub struct TodoListRepository {
    conn: SharedConnection,
}

impl TodoListRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<TodoList> for TodoListRepository {
    async fn create(&self, entity: &TodoList) -> DomainResult<TodoList> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let now = now_millis();
        conn.execute(
            "INSERT INTO todo_lists (title, description, created_at, updated_at) VALUES (?, ?, ?, ?)",
            params![entity.title, entity.description, now, now],
        )?;

        let mut list = entity.clone();
        list.id = to_id(conn.last_insert_rowid())?;
        list.created_at = Some(now);
        list.updated_at = Some(now);
        Ok(list)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<TodoList>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let list = conn
            .query_row(&format!("{} WHERE id = ?", SELECT_LIST), params![id], row_to_list)
            .optional()?;
        Ok(list)
    }

    async fn list(&self) -> DomainResult<Vec<TodoList>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_LIST))?;
        let lists = stmt
            .query_map([], row_to_list)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    async fn update(&self, entity: &TodoList) -> DomainResult<TodoList> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let now = now_millis();
        let changed = conn.execute(
            "UPDATE todo_lists SET title = ?, description = ?, updated_at = ? WHERE id = ?",
            params![entity.title, entity.description, now, entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Todo list {} not found", entity.id)));
        }

        let mut list = entity.clone();
        list.updated_at = Some(now);
        Ok(list)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = connection_mut(&mut guard)?;

        // Items first, then the list, in one transaction
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM todo_items WHERE todo_list_id = ?", params![id])?;
        let deleted = tx.execute("DELETE FROM todo_lists WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!("Todo list {} not found", id)));
        }
        tx.commit()?;

        Ok(())
    }
}

/// Convert a database row to TodoList
fn row_to_list(row: &rusqlite::Row) -> rusqlite::Result<TodoList> {
    Ok(TodoList {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
