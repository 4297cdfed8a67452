//! Response DTOs for the API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheSnapshot;

/// Response body for `GET /admin/cache`
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub success: bool,
    pub cache: CacheSnapshot,
    /// Live keys, sorted
    pub keys: Vec<String>,
}

impl CacheStatsResponse {
    pub fn new(cache: CacheSnapshot, keys: Vec<String>) -> Self {
        Self {
            success: true,
            cache,
            keys,
        }
    }
}

/// Response body for `DELETE /admin/cache`
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    pub success: bool,
    pub message: String,
}

impl FlushResponse {
    pub fn cleared() -> Self {
        Self {
            success: true,
            message: "Cache cleared successfully".to_string(),
        }
    }
}

/// Response body for `DELETE /admin/cache/keys/:key`
#[derive(Debug, Clone, Serialize)]
pub struct FlushKeyResponse {
    pub success: bool,
    pub message: String,
    /// Whether a live entry existed
    pub removed: bool,
}

impl FlushKeyResponse {
    pub fn new(key: &str, removed: bool) -> Self {
        Self {
            success: true,
            message: format!("Cache key '{}' cleared", key),
            removed,
        }
    }
}

/// Response body for `DELETE /admin/cache/pattern`
#[derive(Debug, Clone, Serialize)]
pub struct FlushPatternResponse {
    pub success: bool,
    pub message: String,
    /// Number of entries removed
    pub removed: usize,
}

impl FlushPatternResponse {
    pub fn new(pattern: &str, removed: usize) -> Self {
        Self {
            success: true,
            message: format!("Cleared {} cache entries matching '{}'", removed, pattern),
            removed,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
