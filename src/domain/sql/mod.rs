//! SQL generation: schema creation and parameterized inserts per dialect.

pub mod dialect;
pub mod statement;

pub use dialect::Dialect;
pub use statement::{create_statement, insert_statement, rebind, NamedStatement, PositionalStatement};
