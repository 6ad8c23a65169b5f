// SPDX-License-Identifier: Apache-2.0

//! Bounded read-only access to the Factotum SQLite file.
//!
//! Every unit of work opens its own connection on the blocking pool. A
//! semaphore caps how many run at once and the SQL timeout covers both the
//! wait for a permit and the query itself. Work still queued when the
//! timeout fires never starts; a query already running is interrupted.

mod sqlite_adapters;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use factotum_ws_query::QueryError;
use rusqlite::{Connection, InterruptHandle};
use thiserror::Error;
use tokio::sync::{oneshot, Semaphore};
use tokio::time::timeout;
use tracing::warn;

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database open failed: {0}")]
    Open(String),
    #[error("connection pool unavailable")]
    Unavailable,
    #[error("database query timed out")]
    Timeout,
    #[error("database task failed: {0}")]
    Task(String),
    #[error(transparent)]
    Query(#[from] QueryError),
}

#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    permits: Arc<Semaphore>,
    cfg: DatabaseConfig,
}

impl Database {
    #[must_use]
    pub fn new(cfg: DatabaseConfig) -> Self {
        Self {
            path: cfg.path.clone(),
            permits: Arc::new(Semaphore::new(cfg.max_connections)),
            cfg,
        }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub async fn run<T, F>(&self, work: F) -> Result<T, DbError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, QueryError> + Send + 'static,
    {
        let permit = match timeout(self.cfg.sql_timeout, self.permits.clone().acquire_owned()).await
        {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => return Err(DbError::Unavailable),
            Err(_) => {
                warn!(
                    max_connections = self.cfg.max_connections,
                    "timed out waiting for a database connection"
                );
                return Err(DbError::Timeout);
            }
        };

        let path = self.path.clone();
        let cache_kib = self.cfg.sqlite_pragma_cache_kib;
        let mmap_bytes = self.cfg.sqlite_pragma_mmap_bytes;
        let (interrupt_tx, mut interrupt_rx) = oneshot::channel::<InterruptHandle>();
        let cancelled = Arc::new(AtomicBool::new(false));
        let task_cancelled = Arc::clone(&cancelled);
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let conn = sqlite_adapters::open_readonly_no_mutex(&path)?;
            sqlite_adapters::apply_readonly_pragmas(&conn, cache_kib, mmap_bytes)?;
            // The handle is published before the flag is read, so a timeout
            // either stops the work here or finds the handle to interrupt.
            let _ = interrupt_tx.send(conn.get_interrupt_handle());
            if task_cancelled.load(Ordering::SeqCst) {
                return Err(DbError::Timeout);
            }
            work(&conn).map_err(DbError::Query)
        });

        match timeout(self.cfg.sql_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(DbError::Task(join.to_string())),
            Err(_) => {
                cancelled.store(true, Ordering::SeqCst);
                if let Ok(handle) = interrupt_rx.try_recv() {
                    handle.interrupt();
                }
                warn!(
                    timeout_ms = self.cfg.sql_timeout.as_millis() as u64,
                    "database query timed out"
                );
                Err(DbError::Timeout)
            }
        }
    }
}
