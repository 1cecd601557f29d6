pub mod app;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{Attendant, Backend, SqlBackend};
pub use domain::{FieldKind, FieldValue, Identifier, Record};
pub use error::{AttendantError, BackendError, DecodeError, FormatError, IngestError, SqlError};
pub use infra::halter::Halter;
pub use transport::http::{HttpAttendant, HttpConfig};
