//! Chat-state storage for ReSchedule

mod models;
mod schema;

pub use models::*;

use crate::error::StoreError;
use async_trait::async_trait;
use rusqlite::OptionalExtension;
use std::sync::Arc;
use tokio_rusqlite::Connection;
use tracing::info;

/// Lookup and write access to per-chat settings.
///
/// After `upsert` returns, `get` for the same chat id sees the written values.
#[async_trait]
pub trait ChatStore: Send + Sync + std::fmt::Debug {
    async fn get(&self, chat_id: i64) -> Result<Option<ChatState>, StoreError>;

    /// Create the chat's record or update the existing one
    async fn upsert(&self, state: &ChatState) -> Result<(), StoreError>;

    /// Flip the week toggle in one step and return the new state.
    /// `None` if the chat has no record.
    async fn toggle_week(&self, chat_id: i64) -> Result<Option<ChatState>, StoreError>;
}

/// SQLite-backed store
#[derive(Clone, Debug)]
pub struct Database {
    conn: Arc<Connection>,
}

impl Database {
    /// Create a new database connection
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path).await?;
        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Private in-memory database, already migrated
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().await?;
        let db = Self {
            conn: Arc::new(conn),
        };
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .call(|conn| {
                conn.execute_batch(schema::MIGRATIONS)?;
                Ok(())
            })
            .await?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Number of chats with a group set
    pub async fn chat_count(&self) -> Result<usize, StoreError> {
        let count = self
            .conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM chat_state", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count.max(0) as usize)
    }
}

#[async_trait]
impl ChatStore for Database {
    async fn get(&self, chat_id: i64) -> Result<Option<ChatState>, StoreError> {
        let state = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT chat_id, group_id, week_toggle FROM chat_state WHERE chat_id = ?",
                )?;
                let result = stmt
                    .query_row([chat_id], |row| {
                        Ok(ChatState {
                            chat_id: row.get(0)?,
                            group_id: row.get(1)?,
                            week_toggle: row.get(2)?,
                        })
                    })
                    .optional()?;
                Ok(result)
            })
            .await?;
        Ok(state)
    }

    async fn upsert(&self, state: &ChatState) -> Result<(), StoreError> {
        let state = state.clone();
        let now = chrono::Utc::now().timestamp();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let exists = tx
                    .prepare("SELECT 1 FROM chat_state WHERE chat_id = ?")?
                    .exists([state.chat_id])?;

                if exists {
                    info!("Updating chat {}", state.chat_id);
                    tx.execute(
                        "UPDATE chat_state SET group_id = ?, week_toggle = ?, updated_at = ?
                         WHERE chat_id = ?",
                        rusqlite::params![state.group_id, state.week_toggle, now, state.chat_id],
                    )?;
                } else {
                    info!("Creating chat {} with group {}", state.chat_id, state.group_id);
                    tx.execute(
                        "INSERT INTO chat_state (chat_id, group_id, week_toggle, updated_at)
                         VALUES (?, ?, ?, ?)",
                        rusqlite::params![state.chat_id, state.group_id, state.week_toggle, now],
                    )?;
                }

                tx.commit()?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    async fn toggle_week(&self, chat_id: i64) -> Result<Option<ChatState>, StoreError> {
        let now = chrono::Utc::now().timestamp();
        let state = self
            .conn
            .call(move |conn| {
                let result = conn
                    .query_row(
                        "UPDATE chat_state SET week_toggle = NOT week_toggle, updated_at = ?
                         WHERE chat_id = ?
                         RETURNING chat_id, group_id, week_toggle",
                        rusqlite::params![now, chat_id],
                        |row| {
                            Ok(ChatState {
                                chat_id: row.get(0)?,
                                group_id: row.get(1)?,
                                week_toggle: row.get(2)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(result)
            })
            .await?;
        Ok(state)
    }
}
