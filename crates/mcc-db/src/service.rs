//! Service layer owning the database handle.
//!
//! `ControlService` wraps `ControlDb`. All repo methods are implemented as
//! `impl ControlService` blocks in [`crate::repos`].

use crate::ControlDb;
use crate::error::DatabaseError;

/// Entry point for all storage operations.
pub struct ControlService {
    db: ControlDb,
}

impl ControlService {
    /// Create a service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = ControlDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `ControlDb`.
    #[must_use]
    pub const fn from_db(db: ControlDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ControlDb {
        &self.db
    }
}
