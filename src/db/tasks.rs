//! Task CRUD operations.

use super::Database;
use anyhow::{Result, anyhow};
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};

/// A persisted task record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// Assigned by SQLite at insert time (CURRENT_TIMESTAMP), never modified.
    pub created_at: String,
}

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed: row.get("completed")?,
        created_at: row.get("createdAt")?,
    })
}

/// Internal helper to get a task using an existing connection, so that
/// write-then-refetch sequences stay under a single lock acquisition.
fn get_task_internal(conn: &Connection, id: i64) -> Result<Option<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1")?;

    let result = stmt.query_row(params![id], parse_task_row);

    match result {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// Create a new task. `completed` defaults to false and `createdAt`
    /// to the current time; the id is auto-assigned and never reused.
    pub fn create_task(&self, title: &str, description: Option<&str>) -> Result<Task> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (title, description) VALUES (?1, ?2)",
                params![title, description],
            )?;

            let id = conn.last_insert_rowid();
            get_task_internal(conn, id)?
                .ok_or_else(|| anyhow!("inserted task {} not found on re-fetch", id))
        })
    }

    /// List tasks, optionally filtered by completion state.
    /// No explicit ORDER BY; rows come back in storage order.
    pub fn list_tasks(&self, completed: Option<bool>) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let tasks = match completed {
                Some(flag) => {
                    let mut stmt = conn.prepare("SELECT * FROM tasks WHERE completed = ?1")?;
                    let rows = stmt.query_map(params![flag], parse_task_row)?;
                    rows.collect::<Result<Vec<_>, _>>()?
                }
                None => {
                    let mut stmt = conn.prepare("SELECT * FROM tasks")?;
                    let rows = stmt.query_map([], parse_task_row)?;
                    rows.collect::<Result<Vec<_>, _>>()?
                }
            };
            Ok(tasks)
        })
    }

    /// Fetch a single task by id.
    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| get_task_internal(conn, id))
    }

    /// Overwrite title, description and completed on the matching row
    /// (full replace, not a merge), then re-fetch it. Returns `None` when
    /// no row matched.
    pub fn update_task(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        completed: bool,
    ) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE tasks
                 SET title = ?1, description = ?2, completed = ?3
                 WHERE id = ?4",
                params![title, description, completed, id],
            )?;

            if affected == 0 {
                return Ok(None);
            }

            get_task_internal(conn, id)
        })
    }

    /// Remove the matching row, if any. Deleting a missing id is not an
    /// error; the operation is idempotent from the caller's perspective.
    pub fn delete_task(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(())
        })
    }
}
