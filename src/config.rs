//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{DEFAULT_TTL_SECONDS, MAX_BODY_BYTES};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime of cached responses in seconds
    pub cache_duration: u64,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Largest response body the cache will store, in bytes
    pub max_body_bytes: usize,
    /// Name of the cookie that identifies an authenticated session
    pub session_cookie: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DURATION` - Response TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAX_BODY_BYTES` - Largest cacheable body (default: 1 MiB)
    /// - `SESSION_COOKIE` - Session cookie name (default: `connect.sid`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_duration: parse_var("CACHE_DURATION").unwrap_or(defaults.cache_duration),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            max_body_bytes: parse_var("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            session_cookie: env::var("SESSION_COOKIE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.session_cookie),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_duration: DEFAULT_TTL_SECONDS,
            cleanup_interval: 60,
            server_port: 3000,
            max_body_bytes: MAX_BODY_BYTES,
            session_cookie: "connect.sid".to_string(),
        }
    }
}
