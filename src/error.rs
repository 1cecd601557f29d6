//! Error taxonomy of the ingestion gateway.
//!
//! Inference, decoding and validation failures are reported to the producer as
//! client errors and never stop a listener. SQL generation and storage
//! failures travel up through [`BackendError`]. Nothing here is retried.

use crate::domain::FieldKind;
use std::net::SocketAddr;
use thiserror::Error;

/// A literal matched none of the inference rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unable to convert {literal:?} to a field value")]
pub struct FormatError {
    pub literal: String,
}

/// An inbound message could not be turned into a [`crate::Record`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed record json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("field {field:?}: {source}")]
    Field {
        field: String,
        #[source]
        source: FormatError,
    },
}

/// SQL text could not be generated for a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SqlError {
    #[error("unsupported sql dialect {0:?}")]
    UnsupportedDialect(String),
    #[error("{kind:?} has no column type in dialect {dialect}")]
    UnsupportedType { kind: FieldKind, dialect: &'static str },
    #[error("cannot insert a record without fields")]
    EmptyRecord,
    #[error("record failed validation")]
    InvalidRecord,
    #[error("field {0:?} collides with a generated column")]
    ReservedColumn(String),
    #[error("no value bound for placeholder :{0}")]
    MissingBinding(String),
}

/// Failures raised by a [`crate::Backend`].
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Sql(#[from] SqlError),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("no backend bound to the attendant")]
    Unbound,
    #[error("backend has been stopped")]
    Stopped,
}

/// An attendant could not be brought up.
#[derive(Debug, Error)]
pub enum AttendantError {
    #[error("unable to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("listener on {addr} failed during startup: {source}")]
    Startup {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that can go wrong while handling one inbound request.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("record failed validation")]
    Validation,
    #[error(transparent)]
    Backend(#[from] BackendError),
}
