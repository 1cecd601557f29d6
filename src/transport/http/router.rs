use crate::transport::http::auth::{require_basic_auth, Credentials};
use crate::transport::http::handlers::ingest;
use crate::transport::http::types::AppState;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::put;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Upper bound on reading a request and writing its response.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Single path: `PUT /` registers, `POST /` stores.
///
/// With credentials the Basic-Auth gate wraps the whole router, so a request
/// without them never reaches routing.
pub fn create_router(app_state: AppState, credentials: Option<Credentials>) -> Router {
    let router = Router::new()
        .route(
            "/",
            put(ingest::register_handler).post(ingest::store_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state);

    let router = match credentials {
        Some(credentials) => router.layer(middleware::from_fn_with_state(
            Arc::new(credentials),
            require_basic_auth,
        )),
        None => router,
    };

    router
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}
