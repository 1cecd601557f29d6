//! Alive/Dead lifecycle flag for stoppable components.
//!
//! Each component owns its own [`Halter`]. The first [`Halter::die_with`]
//! runs the component's shutdown sequence; concurrent callers wait for that
//! sequence to finish, later callers return immediately. The halter reads
//! alive until the sequence has completed.

use std::future::Future;
use tokio::sync::OnceCell;

#[derive(Debug, Default)]
pub struct Halter {
    dead: OnceCell<()>,
}

impl Halter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alive(&self) -> bool {
        !self.dead.initialized()
    }

    /// Transition to dead without a shutdown sequence.
    pub async fn die(&self) -> bool {
        self.die_with(|| async {}).await
    }

    /// Runs `shutdown` exactly once across all callers, then marks the
    /// halter dead. Returns `true` only for the caller whose `shutdown` ran.
    pub async fn die_with<F, Fut>(&self, shutdown: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut ran = false;
        self.dead
            .get_or_init(|| async {
                shutdown().await;
                ran = true;
            })
            .await;
        ran
    }
}
