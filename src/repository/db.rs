//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared connection slot handed to every repository
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// Drop the connection; repositories fail with `Internal` afterwards
    pub async fn close(&self) {
        let mut guard = self.conn.lock().await;
        *guard = None;
    }
}

impl Default for DbState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Borrow the connection out of a locked slot
pub(crate) fn connection(slot: &Option<Connection>) -> DomainResult<&Connection> {
    slot.as_ref()
        .ok_or_else(|| DomainError::Internal("Database not initialized".to_string()))
}

/// Mutable variant of [`connection`], needed for transactions
pub(crate) fn connection_mut(slot: &mut Option<Connection>) -> DomainResult<&mut Connection> {
    slot.as_mut()
        .ok_or_else(|| DomainError::Internal("Database not initialized".to_string()))
}

/// Current time as stored in `created_at` / `updated_at`
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Convert a SQLite rowid to an entity ID
pub(crate) fn to_id(rowid: i64) -> DomainResult<u32> {
    u32::try_from(rowid).map_err(|_| DomainError::Internal(format!("Row id {} out of range", rowid)))
}

/// Open the database at `db_path` (`:memory:` allowed) and run migrations
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()?
    } else {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Internal(format!("Failed to create db dir: {}", e)))?;
        }
        Connection::open(db_path)?
    };

    run_migrations(&conn)?;

    let state = DbState::new();
    *state.conn.lock().await = Some(conn);
    Ok(state)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS todo_lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS todo_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            todo_list_id INTEGER NOT NULL REFERENCES todo_lists(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_todo_items_list ON todo_items(todo_list_id, position);",
    )?;

    Ok(())
}
