use crate::domain::sql::{rebind, Dialect, NamedStatement};
use crate::domain::FieldValue;
use crate::error::BackendError;
use crate::storage::Storage;
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Connects to `source`, e.g. `sqlite::memory:` or `sqlite://hub.db?mode=rwc`.
    pub async fn connect(source: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(source)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &FieldValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        FieldValue::Bool(b) => query.bind(*b),
        FieldValue::Int(i) => query.bind(*i),
        FieldValue::Float(f) => query.bind(*f),
        FieldValue::String(s) => query.bind(s.clone()),
        FieldValue::Null | FieldValue::Invalid => query.bind(None::<String>),
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn execute(&self, sql: &str) -> Result<(), BackendError> {
        sqlx::query(sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn execute_named(&self, statement: &NamedStatement) -> Result<(), BackendError> {
        let positional = rebind(statement, Dialect::Sqlite)?;
        let query = positional
            .values
            .iter()
            .fold(sqlx::query(&positional.sql), bind_value);
        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
