//! Cache Entry Module
//!
//! Defines cached response bodies and the expiring entries that hold them.

use bytes::Bytes;

// == Cached Response ==
/// A response body captured from a downstream handler.
///
/// The body is a [`Bytes`] handle, so cloning shares the buffer and the
/// stored bytes can never be mutated through a value returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    /// Raw response body
    pub body: Bytes,
    /// `Content-Type` of the original response, if it had one
    pub content_type: Option<String>,
}

impl CachedResponse {
    /// Creates a cached response without a content type.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            content_type: None,
        }
    }

    /// Attaches the content type to restore on a hit.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Body length in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl From<&'static str> for CachedResponse {
    fn from(body: &'static str) -> Self {
        Self::new(Bytes::from_static(body.as_bytes()))
    }
}

// == Cache Entry ==
/// A cached response together with its lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response
    pub value: CachedResponse,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl_seconds` after `now_ms`.
    pub fn new(value: CachedResponse, ttl_seconds: u64, now_ms: u64) -> Self {
        Self {
            value,
            expires_at: now_ms.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now_ms` reaches its expiration time.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }
}
