//! Explicit transaction scopes over one shared connection.
//!
//! # Responsibility
//! - Serialize access to a single SQLite connection across threads.
//! - Wrap every caller closure in a transaction that commits on `Ok`
//!   and rolls back on any other exit.
//!
//! # Invariants
//! - `TxMode::Write` takes the database write lock up front (`BEGIN IMMEDIATE`),
//!   so a check-then-write sequence inside one scope cannot interleave with
//!   another writer.
//! - Dropping an uncommitted `Transaction` rolls it back.

use super::DbError;
#[cfg(test)]
use super::DbResult;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::sync::Mutex;

/// Transaction flavor requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    /// Deferred transaction; no write lock is taken.
    Read,
    /// Immediate transaction holding the write lock until commit/rollback.
    Write,
}

impl TxMode {
    fn behavior(self) -> TransactionBehavior {
        match self {
            Self::Read => TransactionBehavior::Deferred,
            Self::Write => TransactionBehavior::Immediate,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// A migrated connection shared by every caller in the process.
#[derive(Debug)]
pub struct SharedConnection {
    conn: Mutex<Connection>,
}

impl SharedConnection {
    /// Wraps an already bootstrapped connection (see `open_db*`).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Runs `op` inside one transaction of the requested mode.
    ///
    /// # Errors
    /// - Returns the closure error unchanged after rolling back.
    /// - Returns `DbError` (converted into `E`) when the lock is poisoned or
    ///   begin/commit fails.
    pub fn with_transaction<T, E>(
        &self,
        mode: TxMode,
        op: impl FnOnce(&Transaction<'_>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let mut conn = self.conn.lock().map_err(|_| E::from(DbError::LockPoisoned))?;
        let tx = conn
            .transaction_with_behavior(mode.behavior())
            .map_err(|err| E::from(DbError::from(err)))?;
        let value = op(&tx)?;
        tx.commit().map_err(|err| E::from(DbError::from(err)))?;
        Ok(value)
    }

    /// Runs a closure against the raw connection outside any transaction.
    #[cfg(test)]
    fn with_connection<T>(&self, op: impl FnOnce(&Connection) -> DbResult<T>) -> DbResult<T> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        op(&conn)
    }
}
