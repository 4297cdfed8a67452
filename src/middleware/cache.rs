//! Response Cache Middleware
//!
//! Serves GET responses from the [`ResponseCache`] and captures successful
//! downstream responses on a miss.
//!
//! Per request the middleware either bypasses the cache entirely (non-GET
//! methods, authenticated sessions) or looks the request up:
//! - hit: the stored body is returned with `X-Cache: HIT` and the downstream
//!   handler never runs;
//! - miss: the downstream handler runs; a `200 OK` body is stored and returned
//!   with `X-Cache: MISS`, any other status passes through untouched.
//!
//! A miss is not stored if any flush ran while the downstream handler was
//! working. Bodies over the size limit are streamed through, not buffered.

use std::fmt;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::cache::{CachedResponse, ResponseCache, DEFAULT_TTL_SECONDS, MAX_BODY_BYTES};
use crate::error::Result;
use crate::middleware::body::{capture_body, CapturedBody};
use crate::middleware::AuthenticatedSession;

/// Cache status header name.
pub const X_CACHE: &str = "x-cache";
/// Header carrying the computed cache key.
pub const X_CACHE_KEY: &str = "x-cache-key";
/// Prefix of keys produced by [`default_cache_key`].
pub const DEFAULT_KEY_PREFIX: &str = "cache:";

/// Derives a cache key from a request.
pub type KeyGenerator = Arc<dyn Fn(&Request) -> Result<String> + Send + Sync>;

// == Cache Options ==
/// Per-route cache configuration.
#[derive(Clone)]
pub struct CacheOptions {
    /// Lifetime of stored responses in seconds
    pub duration: u64,
    /// Custom key derivation; [`default_cache_key`] when `None`
    pub key_generator: Option<KeyGenerator>,
    /// Bodies larger than this are served but not stored
    pub max_body_bytes: usize,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_TTL_SECONDS,
            key_generator: None,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}

impl fmt::Debug for CacheOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOptions")
            .field("duration", &self.duration)
            .field("key_generator", &self.key_generator.as_ref().map(|_| ".."))
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl CacheOptions {
    /// Options with the given TTL in seconds.
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn with_key_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(&Request) -> Result<String> + Send + Sync + 'static,
    {
        self.key_generator = Some(Arc::new(generator));
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

// == Middleware State ==
/// State handed to [`cache_middleware`] through `from_fn_with_state`.
#[derive(Clone, Debug)]
pub struct CacheMiddleware {
    cache: ResponseCache,
    options: CacheOptions,
}

impl CacheMiddleware {
    pub fn new(cache: ResponseCache, options: CacheOptions) -> Self {
        Self { cache, options }
    }

    fn cache_key(&self, req: &Request) -> Result<String> {
        match &self.options.key_generator {
            Some(generator) => generator(req),
            None => Ok(default_cache_key(req)),
        }
    }
}

/// `cache:` followed by the request path and query string.
pub fn default_cache_key(req: &Request) -> String {
    format!("{}{}", DEFAULT_KEY_PREFIX, path_and_query(req))
}

/// The request path including its query string, if any.
pub fn path_and_query(req: &Request) -> &str {
    let uri = req.uri();
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}

fn is_cacheable(req: &Request) -> bool {
    req.method() == Method::GET && req.extensions().get::<AuthenticatedSession>().is_none()
}

// == Middleware ==
/// Axum middleware implementing the lookup / capture cycle.
///
/// Use with `axum::middleware::from_fn_with_state(CacheMiddleware, cache_middleware)`.
/// Key generator errors are returned as the response.
pub async fn cache_middleware(
    State(layer): State<CacheMiddleware>,
    req: Request,
    next: Next,
) -> Result<Response> {
    if !is_cacheable(&req) {
        debug!(method = %req.method(), uri = %req.uri(), "Cache bypass");
        return Ok(next.run(req).await);
    }

    let key = layer.cache_key(&req)?;
    let stats = layer.cache.stats();

    if let Some(cached) = layer.cache.get(&key).await {
        stats.record_hit();
        debug!(key = %key, "Cache hit");
        return Ok(hit_response(&key, cached));
    }

    stats.record_miss();
    debug!(key = %key, "Cache miss");

    let generation = layer.cache.generation().await;
    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return Ok(response);
    }

    let (mut parts, body) = response.into_parts();
    annotate(&mut parts.headers, "MISS", &key);

    let limit = layer.options.max_body_bytes;
    let bytes = match capture_body(body, limit).await? {
        CapturedBody::Complete(bytes) => bytes,
        CapturedBody::Oversized(body) => {
            warn!(key = %key, limit, "Response body too large to cache");
            return Ok(Response::from_parts(parts, body));
        }
    };

    let mut value = CachedResponse::new(bytes.clone());
    if let Some(content_type) = parts.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        value = value.with_content_type(content_type);
    }
    let stored = layer
        .cache
        .set_if_unchanged(key.clone(), value, layer.options.duration, generation)
        .await;
    if stored {
        stats.record_set();
        debug!(key = %key, bytes = bytes.len(), "Response cached");
    } else {
        debug!(key = %key, "Cache flushed during request, response not stored");
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

fn hit_response(key: &str, cached: CachedResponse) -> Response {
    let mut response = Response::new(Body::from(cached.body));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    if let Some(content_type) = cached
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
    {
        headers.insert(CONTENT_TYPE, content_type);
    }
    annotate(headers, "HIT", key);
    response
}

fn annotate(headers: &mut HeaderMap, status: &'static str, key: &str) {
    headers.insert(X_CACHE, HeaderValue::from_static(status));
    match HeaderValue::from_str(key) {
        Ok(value) => {
            headers.insert(X_CACHE_KEY, value);
        }
        Err(_) => debug!(key, "Cache key is not a valid header value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    fn request(method: Method, uri: &str) -> Request {
        HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_default_key_includes_query() {
        let req = request(Method::GET, "/listings?location=Goa&page=2");
        assert_eq!(default_cache_key(&req), "cache:/listings?location=Goa&page=2");
    }

    #[test]
    fn test_default_key_without_query() {
        let req = request(Method::GET, "/listings/7");
        assert_eq!(default_cache_key(&req), "cache:/listings/7");
    }

    #[test]
    fn test_non_get_is_not_cacheable() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
            assert!(!is_cacheable(&request(method, "/listings")));
        }
        assert!(is_cacheable(&request(Method::GET, "/listings")));
    }

    #[test]
    fn test_authenticated_request_is_not_cacheable() {
        let mut req = request(Method::GET, "/listings");
        req.extensions_mut().insert(AuthenticatedSession);
        assert!(!is_cacheable(&req));
    }

    #[test]
    fn test_custom_key_generator() {
        let layer = CacheMiddleware::new(
            ResponseCache::new(),
            CacheOptions::new(60).with_key_generator(|req| Ok(format!("listings:{}", req.uri().path()))),
        );
        let req = request(Method::GET, "/listings/3?x=1");
        assert_eq!(layer.cache_key(&req).unwrap(), "listings:/listings/3");
    }

    #[test]
    fn test_options_defaults() {
        let options = CacheOptions::default();
        assert_eq!(options.duration, 300);
        assert!(options.key_generator.is_none());
        assert_eq!(options.max_body_bytes, MAX_BODY_BYTES);
    }

    #[test]
    fn test_hit_response_restores_content_type() {
        let cached = CachedResponse::new("[]").with_content_type("application/json");
        let response = hit_response("cache:/listings", cached);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[X_CACHE], "HIT");
        assert_eq!(response.headers()[X_CACHE_KEY], "cache:/listings");
    }
}
