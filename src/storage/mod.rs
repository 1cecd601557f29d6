//! Relational storage engines.
//!
//! The core only needs three things from an engine: run an arbitrary
//! statement, run a named-parameter statement with its bindings, and close.

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresStorage;
pub use sqlite::SqliteStorage;

use crate::app::backend::{Backend, SqlBackend};
use crate::domain::sql::{Dialect, NamedStatement};
use crate::error::BackendError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

#[async_trait]
pub trait Storage: Send + Sync {
    fn dialect(&self) -> Dialect;

    async fn execute(&self, sql: &str) -> Result<(), BackendError>;

    /// Runs a statement whose `:name` placeholders are bound from
    /// `statement.bindings`.
    async fn execute_named(&self, statement: &NamedStatement) -> Result<(), BackendError>;

    async fn close(&self);
}

/// Opens the storage engine named by `driver` ("sqlite3" or "postgres") on
/// `source` and wraps it in a [`SqlBackend`].
pub async fn connect(driver: &str, source: &str) -> Result<Arc<dyn Backend>, BackendError> {
    let dialect: Dialect = driver.parse()?;
    let backend: Arc<dyn Backend> = match dialect {
        Dialect::Sqlite => Arc::new(SqlBackend::new(SqliteStorage::connect(source).await?)),
        Dialect::Postgres => Arc::new(SqlBackend::new(PostgresStorage::connect(source).await?)),
    };
    info!(%dialect, "storage connected");
    Ok(backend)
}
