pub mod attendant;
pub mod auth;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod ingest;
}

pub use attendant::{HttpAttendant, HttpConfig};
pub use auth::Credentials;
pub use router::create_router;
pub use types::AppState;
