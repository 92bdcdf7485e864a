//! # mcc-db
//!
//! libSQL storage for the MCP Control Center.
//!
//! Holds all relational state: projects, features, specifications, refactor
//! plans, ADRs, rules, proposals, and agent updates. Repository methods live
//! on [`service::ControlService`] in `impl` blocks under [`repos`].
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

/// Database handle: one libSQL database and one shared connection.
///
/// Most writes are a single statement and commit on their own. Multi-row
/// writes go through [`ControlDb::transaction`].
pub struct ControlDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    tx_lock: Mutex<()>,
}

/// An open transaction on the shared connection.
///
/// Holds the transaction lock until [`commit`](Self::commit) or
/// [`rollback`](Self::rollback).
pub struct ControlTx<'a> {
    tx: libsql::Transaction,
    _guard: MutexGuard<'a, ()>,
}

impl ControlTx<'_> {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the rollback fails.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

impl ControlDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let control_db = Self {
            db,
            conn,
            tx_lock: Mutex::new(()),
        };
        control_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(control_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Begin a transaction on the shared connection.
    ///
    /// Only one transaction is open at a time; callers queue on the lock.
    /// Statements issued through [`Self::conn`] while it is open join it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if `BEGIN` fails.
    pub async fn transaction(&self) -> Result<ControlTx<'_>, DatabaseError> {
        let guard = self.tx_lock.lock().await;
        let tx = self.conn.transaction().await?;
        Ok(ControlTx { tx, _guard: guard })
    }

    /// Run a single-row `INSERT ... RETURNING id` and return the new id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails or returns no row.
    pub async fn insert_returning_id(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<i64, DatabaseError> {
        let mut rows = self.conn.query(sql, params).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
