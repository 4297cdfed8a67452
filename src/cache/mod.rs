//! Cache Module
//!
//! In-memory response caching with TTL expiration, wildcard invalidation and
//! hit/miss accounting.

mod clock;
mod entry;
mod pattern;
mod response_cache;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, CachedResponse};
pub use pattern::KeyPattern;
pub use response_cache::ResponseCache;
pub use stats::{CacheSnapshot, CacheStats};
pub use store::CacheStore;

// == Public Constants ==
/// Default response lifetime in seconds
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Maximum allowed wildcard pattern length in bytes
pub const MAX_PATTERN_LENGTH: usize = 512;

/// Maximum response body the middleware stores, in bytes
pub const MAX_BODY_BYTES: usize = 1024 * 1024; // 1 MB
