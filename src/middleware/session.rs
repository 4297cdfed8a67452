//! Session Detection
//!
//! Marks requests that belong to an authenticated session so that
//! personalized responses are never cached.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};

/// Request extension present when the request carries session identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedSession;

/// State for [`detect_session`]: the session cookie name.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    cookie_name: Arc<str>,
}

impl SessionConfig {
    pub fn new(cookie_name: &str) -> Self {
        Self {
            cookie_name: Arc::from(cookie_name),
        }
    }
}

/// Inserts [`AuthenticatedSession`] into the request extensions when the
/// request has an `Authorization` header or a non-empty session cookie.
pub async fn detect_session(
    State(config): State<SessionConfig>,
    mut req: Request,
    next: Next,
) -> Response {
    if has_session(req.headers(), &config.cookie_name) {
        req.extensions_mut().insert(AuthenticatedSession);
    }
    next.run(req).await
}

pub fn has_session(headers: &HeaderMap, cookie_name: &str) -> bool {
    if headers.contains_key(AUTHORIZATION) {
        return true;
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == cookie_name && !value.is_empty())
}
