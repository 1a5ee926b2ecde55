//! TodoItem List Operations
//!
//! Queries over the ordered item collection of a single list.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::todo_item_repo::{row_to_item, TodoItemRepository, SELECT_ITEM};
use crate::domain::{DomainError, DomainResult, TodoItem};
use crate::repository::db::{connection, connection_mut};
use crate::repository::traits::{Removal, TodoItemListOperations};

#[async_trait]
impl TodoItemListOperations for TodoItemRepository {
    async fn list_by_list(&self, todo_list_id: u32) -> DomainResult<Vec<TodoItem>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE todo_list_id = ? ORDER BY position ASC, id ASC",
            SELECT_ITEM
        ))?;
        let items = stmt
            .query_map(params![todo_list_id], row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    async fn count_by_list(&self, todo_list_id: u32) -> DomainResult<usize> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM todo_items WHERE todo_list_id = ?",
            params![todo_list_id],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as usize)
    }

    async fn find_in_list(&self, todo_list_id: u32, id: u32) -> DomainResult<Option<TodoItem>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let item = conn
            .query_row(
                &format!("{} WHERE id = ? AND todo_list_id = ?", SELECT_ITEM),
                params![id, todo_list_id],
                row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    async fn delete_and_prune(&self, todo_list_id: u32, id: u32) -> DomainResult<Removal> {
        let mut guard = self.conn.lock().await;
        let conn = connection_mut(&mut guard)?;

        // Dropping the transaction on an early return rolls it back
        let tx = conn.transaction()?;
        let deleted = tx.execute(
            "DELETE FROM todo_items WHERE id = ? AND todo_list_id = ?",
            params![id, todo_list_id],
        )?;
        if deleted == 0 {
            return Err(DomainError::NotFound(format!(
                "Todo item {} not found in list {}",
                id, todo_list_id
            )));
        }

        let remaining: i64 = tx.query_row(
            "SELECT COUNT(*) FROM todo_items WHERE todo_list_id = ?",
            params![todo_list_id],
            |row| row.get(0),
        )?;
        let removal = if remaining == 0 {
            tx.execute("DELETE FROM todo_lists WHERE id = ?", params![todo_list_id])?;
            Removal::ListDeleted
        } else {
            Removal::ItemRemoved
        };
        tx.commit()?;

        Ok(removal)
    }
}
