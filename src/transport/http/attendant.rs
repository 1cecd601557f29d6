//! HTTP attendant: listens on one address and forwards records to a backend.
//!
//! Lifecycle: `start` binds and spawns the accept loop, then waits out a short
//! startup window so an immediate listener failure is reported to the caller
//! instead of a live instance. `stop` signals graceful shutdown, gives
//! in-flight requests a bounded grace period, and returns once the loop has
//! exited.

use crate::app::attendant::Attendant;
use crate::app::backend::Backend;
use crate::error::AttendantError;
use crate::infra::halter::Halter;
use crate::transport::http::auth::Credentials;
use crate::transport::http::router::create_router;
use crate::transport::http::types::{AppState, BackendSlot};
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// How long `start` waits for the accept loop to fail before assuming success.
pub const STARTUP_WINDOW: Duration = Duration::from_millis(100);

/// How long `stop` lets in-flight requests drain before aborting the loop.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Configuration for an [`HttpAttendant`].
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    /// Listen address, e.g. `127.0.0.1:8080` or `0.0.0.0:0`.
    pub listen: String,
    /// Basic-Auth username; auth is disabled unless both parts are non-empty.
    pub username: String,
    pub password: String,
}

struct Running {
    shutdown: oneshot::Sender<()>,
    server: JoinHandle<io::Result<()>>,
}

pub struct HttpAttendant {
    local_addr: SocketAddr,
    backend: BackendSlot,
    running: Mutex<Option<Running>>,
    halter: Halter,
}

impl HttpAttendant {
    /// Binds `config.listen` and starts serving.
    ///
    /// Fails if the address cannot be bound (e.g. another attendant holds it)
    /// or the accept loop dies within [`STARTUP_WINDOW`].
    pub async fn start(config: HttpConfig) -> Result<Self, AttendantError> {
        let bind_err = |source| AttendantError::Bind {
            addr: config.listen.clone(),
            source,
        };
        let listener = TcpListener::bind(config.listen.as_str())
            .await
            .map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        let credentials = Credentials::new(&config.username, &config.password);
        let auth = credentials.is_some();

        let backend: BackendSlot = Arc::new(RwLock::new(None));
        let router = create_router(AppState::new(backend.clone()), credentials);

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tokio::select! {
            _ = tokio::time::sleep(STARTUP_WINDOW) => {}
            exited = &mut server => {
                let source = match exited {
                    Ok(Ok(())) => io::Error::new(io::ErrorKind::Other, "accept loop exited during startup"),
                    Ok(Err(e)) => e,
                    Err(join) => io::Error::new(io::ErrorKind::Other, join),
                };
                return Err(AttendantError::Startup { addr: local_addr, source });
            }
        }

        info!(%local_addr, auth, "http attendant listening");
        Ok(Self {
            local_addr,
            backend,
            running: Mutex::new(Some(Running { shutdown, server })),
            halter: Halter::new(),
        })
    }

    /// The address actually bound (useful when listening on port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_alive(&self) -> bool {
        self.halter.alive()
    }

    /// Like [`Attendant::stop`], but reports whether this call performed
    /// the shutdown.
    pub async fn shutdown(&self) -> bool {
        self.halter
            .die_with(|| async {
                info!(local_addr = %self.local_addr, "http attendant stopping");
                let Some(Running { shutdown, mut server }) = self.running.lock().await.take() else {
                    return;
                };
                let _ = shutdown.send(());

                match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
                    Ok(Ok(Ok(()))) => {}
                    Ok(Ok(Err(e))) => warn!(error = %e, "accept loop exited with error"),
                    Ok(Err(e)) => warn!(error = %e, "accept loop task failed"),
                    Err(_) => {
                        warn!(grace = ?SHUTDOWN_GRACE, "grace period elapsed, aborting in-flight requests");
                        server.abort();
                        let _ = server.await;
                    }
                }
                info!(local_addr = %self.local_addr, "http attendant stopped");
            })
            .await
    }
}

#[async_trait]
impl Attendant for HttpAttendant {
    async fn bind(&self, backend: Arc<dyn Backend>) {
        *self.backend.write().await = Some(backend);
        info!(local_addr = %self.local_addr, "backend bound");
    }

    async fn stop(&self) {
        self.shutdown().await;
    }
}

impl Drop for HttpAttendant {
    fn drop(&mut self) {
        if let Some(running) = self.running.get_mut().take() {
            let _ = running.shutdown.send(());
        }
    }
}
