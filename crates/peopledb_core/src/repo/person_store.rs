//! Transaction-scoped access to person repositories.
//!
//! # Responsibility
//! - Choose one storage backend at startup and expose it behind `PersonStore`.
//! - Run every repository call inside an explicit read or write scope.
//!
//! # Invariants
//! - A `write` scope is atomic: all statements commit together or none do.
//! - A failed closure never leaves partial writes behind.

use crate::config::StoreConfig;
use crate::db::{open_db_with_config, DbResult, SharedConnection, TxMode};
use crate::repo::person_repo::{PersonRepository, RepoResult, SqlitePersonRepository};
use log::debug;
use std::sync::Arc;
use std::time::Instant;

/// Source of transaction-scoped repositories.
///
/// Shared across threads; callers hold the store by reference or `Arc`.
pub trait PersonStore: Send + Sync {
    /// Runs `op` in a read-only transaction.
    fn read<T, F>(&self, op: F) -> RepoResult<T>
    where
        F: FnOnce(&dyn PersonRepository) -> RepoResult<T>;

    /// Runs `op` in an exclusive write transaction.
    fn write<T, F>(&self, op: F) -> RepoResult<T>
    where
        F: FnOnce(&dyn PersonRepository) -> RepoResult<T>;

    /// Human-readable backend label for health output.
    fn describe(&self) -> String;
}

impl<S: PersonStore + ?Sized> PersonStore for &S {
    fn read<T, F>(&self, op: F) -> RepoResult<T>
    where
        F: FnOnce(&dyn PersonRepository) -> RepoResult<T>,
    {
        (**self).read(op)
    }

    fn write<T, F>(&self, op: F) -> RepoResult<T>
    where
        F: FnOnce(&dyn PersonRepository) -> RepoResult<T>,
    {
        (**self).write(op)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: PersonStore + ?Sized> PersonStore for Arc<S> {
    fn read<T, F>(&self, op: F) -> RepoResult<T>
    where
        F: FnOnce(&dyn PersonRepository) -> RepoResult<T>,
    {
        (**self).read(op)
    }

    fn write<T, F>(&self, op: F) -> RepoResult<T>
    where
        F: FnOnce(&dyn PersonRepository) -> RepoResult<T>,
    {
        (**self).write(op)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// SQLite person store over one shared, migrated connection.
#[derive(Debug)]
pub struct SqlitePersonStore {
    db: SharedConnection,
    config: StoreConfig,
}

impl SqlitePersonStore {
    /// Opens (and migrates) the database described by `config`.
    pub fn open(config: StoreConfig) -> DbResult<Self> {
        let conn = open_db_with_config(&config)?;
        Ok(Self {
            db: SharedConnection::new(conn),
            config,
        })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::open(StoreConfig::default())
    }

    fn scoped<T, F>(&self, mode: TxMode, op: F) -> RepoResult<T>
    where
        F: FnOnce(&dyn PersonRepository) -> RepoResult<T>,
    {
        let started_at = Instant::now();
        let result = self.db.with_transaction(mode, |tx| {
            let repo = SqlitePersonRepository::new(tx);
            op(&repo)
        });
        debug!(
            "event=store_tx module=repo mode={} status={} duration_ms={}",
            mode.as_str(),
            if result.is_ok() { "commit" } else { "rollback" },
            started_at.elapsed().as_millis()
        );
        result
    }
}

impl PersonStore for SqlitePersonStore {
    fn read<T, F>(&self, op: F) -> RepoResult<T>
    where
        F: FnOnce(&dyn PersonRepository) -> RepoResult<T>,
    {
        self.scoped(TxMode::Read, op)
    }

    fn write<T, F>(&self, op: F) -> RepoResult<T>
    where
        F: FnOnce(&dyn PersonRepository) -> RepoResult<T>,
    {
        self.scoped(TxMode::Write, op)
    }

    fn describe(&self) -> String {
        match self.config.path.as_deref() {
            Some(path) => format!("sqlite:{}", path.display()),
            None => "sqlite::memory:".to_string(),
        }
    }
}
