//! Optional HTTP Basic-Auth gate in front of the router.

use crate::crypto::hashing::{constant_time_eq, hash_password};
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;
use tracing::debug;

/// The single configured username and hashed password.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password_hash: String,
}

impl Credentials {
    /// Returns `None` (auth disabled) unless both parts are non-empty.
    pub fn new(username: &str, password: &str) -> Option<Self> {
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password_hash: hash_password(password),
        })
    }

    /// Checks an `Authorization: Basic ...` header against these credentials.
    pub fn verify(&self, header: &HeaderValue) -> bool {
        let Some((username, password)) = parse_basic(header) else {
            return false;
        };
        // both halves are compared in full so timing does not reveal which one failed
        let user_ok = constant_time_eq(&username, &self.username);
        let pass_ok = constant_time_eq(&hash_password(&password), &self.password_hash);
        user_ok & pass_ok
    }
}

fn parse_basic(header: &HeaderValue) -> Option<(String, String)> {
    let value = header.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

pub async fn require_basic_auth(
    State(credentials): State<Arc<Credentials>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .is_some_and(|h| credentials.verify(h));

    if !authorized {
        debug!(method = %request.method(), "rejecting unauthenticated request");
        return (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, "Basic realm=\"homehub\"")],
        )
            .into_response();
    }

    next.run(request).await
}
