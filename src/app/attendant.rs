//! The transport side of the ingestion boundary.

use crate::app::backend::Backend;
use async_trait::async_trait;
use std::sync::Arc;

/// Listens for inbound messages by some transport and forwards valid records
/// to the bound [`Backend`].
#[async_trait]
pub trait Attendant: Send + Sync {
    /// Sets the destination for validated records. Rebinding replaces the
    /// previous backend for subsequent requests.
    async fn bind(&self, backend: Arc<dyn Backend>);

    /// Terminates the listening loop and releases its network resource.
    ///
    /// Idempotent and safe to call concurrently; every call returns once the
    /// loop has exited.
    async fn stop(&self);
}
