//! Schema-less records: identifiers, value inference and SQL generation.

pub mod identifier;
pub mod record;
pub mod sql;
pub mod value;

pub use identifier::Identifier;
pub use record::Record;
pub use value::{infer, FieldKind, FieldValue};
