//! The storage side of the ingestion boundary.

use crate::domain::sql::{create_statement, insert_statement};
use crate::domain::Record;
use crate::error::BackendError;
use crate::infra::halter::Halter;
use crate::storage::Storage;
use async_trait::async_trait;
use tracing::{debug, info};

/// Trait that defines the contract for any storage variant.
///
/// Attendants only ever talk to storage through this trait, so the decoding
/// and validation path does not know which engine sits behind it. Calls may
/// arrive concurrently, including concurrent first registrations of the same
/// shape.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Ensures a destination matching the record's shape exists. Idempotent.
    async fn register(&self, record: Record) -> Result<(), BackendError>;

    /// Persists the record's values into its destination.
    async fn store(&self, record: Record) -> Result<(), BackendError>;

    /// Releases storage resources.
    async fn stop(&self);
}

/// [`Backend`] over a relational [`Storage`]: register creates the table,
/// store inserts one row.
pub struct SqlBackend<S> {
    storage: S,
    halter: Halter,
}

impl<S: Storage> SqlBackend<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            halter: Halter::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn ensure_alive(&self) -> Result<(), BackendError> {
        if self.halter.alive() {
            Ok(())
        } else {
            Err(BackendError::Stopped)
        }
    }
}

#[async_trait]
impl<S: Storage> Backend for SqlBackend<S> {
    async fn register(&self, record: Record) -> Result<(), BackendError> {
        self.ensure_alive()?;
        // CREATE TABLE IF NOT EXISTS makes racing first registrations harmless.
        let sql = create_statement(&record, self.storage.dialect().tag())?;
        debug!(table = %record.table(), %sql, "registering record shape");
        self.storage.execute(&sql).await
    }

    async fn store(&self, record: Record) -> Result<(), BackendError> {
        self.ensure_alive()?;
        let statement = insert_statement(&record)?;
        debug!(table = %record.table(), sql = %statement.sql, "storing record");
        self.storage.execute_named(&statement).await
    }

    async fn stop(&self) {
        let stopped = self
            .halter
            .die_with(|| async {
                self.storage.close().await;
            })
            .await;
        if stopped {
            info!(dialect = %self.storage.dialect(), "sql backend stopped");
        }
    }
}
