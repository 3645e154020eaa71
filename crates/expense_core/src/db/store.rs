//! Explicitly constructed store handle.
//!
//! A [`Store`] owns the one SQLite connection of the process. It is built at
//! startup and shared through [`crate::db::UnitOfWork`]; there is no global
//! engine or pool.

use super::open::{open_connection, OpenMode};
use super::DbResult;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Migrated SQLite connection guarded for one-scope-at-a-time use.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (or creates) a database file and applies pending migrations.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let conn = open_connection(OpenMode::File(path.as_ref()))?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory database and applies all migrations.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = open_connection(OpenMode::Memory)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Blocks until the connection is free and hands it out.
    ///
    /// Dropping the guard releases the connection. A poisoned lock is
    /// recovered: the panicking scope's transaction was rolled back while
    /// unwinding, so the connection is back in autocommit mode.
    pub(crate) fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
