//! Capability contracts wiring transports to storage.

pub mod attendant;
pub mod backend;

pub use attendant::Attendant;
pub use backend::{Backend, SqlBackend};
