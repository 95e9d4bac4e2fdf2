use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, info};

use crate::validation::ValidationError;

pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
    #[error(transparent)]
    Connection(#[from] diesel::ConnectionError),
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Storage task failed: {0}")]
    Task(String),
}

/// Handle to the relational store. Cheap to clone; every unit of work opens
/// its own connection so requests never share connection state.
#[derive(Clone, Debug)]
pub struct Store {
    database_url: Arc<str>,
}

impl Store {
    /// Builds a store for `database_url` and applies pending migrations.
    pub fn open(database_url: impl Into<String>) -> Result<Self, StoreError> {
        let store = Self::new(database_url);
        let applied = store.run_migrations()?;
        info!(applied, "Store ready");
        Ok(store)
    }

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into().into(),
        }
    }

    pub fn connect(&self) -> Result<SqliteConnection, StoreError> {
        let mut conn = SqliteConnection::establish(&self.database_url)?;
        // SQLite leaves foreign keys off unless asked per connection.
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
        Ok(conn)
    }

    pub fn run_migrations(&self) -> Result<usize, StoreError> {
        let mut conn = self.connect()?;
        let versions = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        for version in &versions {
            debug!(%version, "Applied migration");
        }
        Ok(versions.len())
    }

    /// Runs `f` against a fresh connection on the blocking pool.
    pub async fn interact<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = store.connect()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use tempfile::TempDir;

    use super::Store;

    /// Keeps the temporary directory alive for as long as the store is used.
    pub struct TestStore {
        pub store: Store,
        _dir: TempDir,
    }

    pub fn test_store() -> TestStore {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let store = Store::open(path.to_str().unwrap()).unwrap();
        TestStore { store, _dir: dir }
    }
}
