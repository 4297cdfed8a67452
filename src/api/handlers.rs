//! API Handlers
//!
//! Shared application state and the cache admin endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::{ResponseCache, DEFAULT_TTL_SECONDS, MAX_BODY_BYTES};
use crate::catalog::ListingCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CacheStatsResponse, FlushKeyResponse, FlushPatternQuery, FlushPatternResponse, FlushResponse,
    KeysQuery,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared response cache
    pub cache: ResponseCache,
    /// Listings served by the cached endpoints
    pub listings: Arc<RwLock<ListingCatalog>>,
    /// TTL applied to cached responses, in seconds
    pub cache_duration: u64,
    /// Largest body the cache stores
    pub max_body_bytes: usize,
    /// Cookie marking an authenticated session
    pub session_cookie: String,
}

impl AppState {
    /// Creates a new AppState around `cache` with sample listings and
    /// default settings.
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            cache,
            listings: Arc::new(RwLock::new(ListingCatalog::with_samples())),
            cache_duration: DEFAULT_TTL_SECONDS,
            max_body_bytes: MAX_BODY_BYTES,
            session_cookie: Config::default().session_cookie,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            cache_duration: config.cache_duration,
            max_body_bytes: config.max_body_bytes,
            session_cookie: config.session_cookie.clone(),
            ..Self::new(ResponseCache::new())
        }
    }
}

/// Handler for GET /admin/cache
///
/// Returns counters, entry count, body size and live keys. An optional
/// `?pattern=` filters the key list.
pub async fn cache_stats_handler(
    State(state): State<AppState>,
    Query(query): Query<KeysQuery>,
) -> Result<Json<CacheStatsResponse>> {
    let keys = state.cache.keys(query.pattern.as_deref()).await?;
    let snapshot = state.cache.snapshot().await;

    Ok(Json(CacheStatsResponse::new(snapshot, keys)))
}

/// Handler for DELETE /admin/cache
pub async fn flush_all_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    state.cache.flush_all().await;
    Json(FlushResponse::cleared())
}

/// Handler for DELETE /admin/cache/keys/:key
///
/// Succeeds whether or not the key was present.
pub async fn flush_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<FlushKeyResponse> {
    let removed = state.cache.flush_key(&key).await;
    Json(FlushKeyResponse::new(&key, removed))
}

/// Handler for DELETE /admin/cache/pattern?pattern=...
pub async fn flush_pattern_handler(
    State(state): State<AppState>,
    Query(query): Query<FlushPatternQuery>,
) -> Result<Json<FlushPatternResponse>> {
    let removed = state.cache.flush_pattern(&query.pattern).await?;
    Ok(Json(FlushPatternResponse::new(&query.pattern, removed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedResponse;
    use crate::error::CacheError;

    async fn seeded_state() -> AppState {
        let state = AppState::new(ResponseCache::new());
        for key in ["listings:/listings", "listings:/listings/1", "cache:/vehicles"] {
            state.cache.set(key, CachedResponse::from("[]"), 300).await;
        }
        state
    }

    #[tokio::test]
    async fn test_cache_stats_handler() {
        let state = seeded_state().await;

        let response = cache_stats_handler(State(state), Query(KeysQuery::default()))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.cache.keys, 3);
        assert_eq!(response.cache.size, 6);
        assert_eq!(response.keys.len(), 3);
    }

    #[tokio::test]
    async fn test_cache_stats_handler_with_pattern() {
        let state = seeded_state().await;
        let query = KeysQuery {
            pattern: Some("listings:*".to_string()),
        };

        let response = cache_stats_handler(State(state), Query(query)).await.unwrap();
        assert_eq!(response.keys.len(), 2);
        assert_eq!(response.cache.keys, 3);
    }

    #[tokio::test]
    async fn test_flush_all_handler() {
        let state = seeded_state().await;

        let response = flush_all_handler(State(state.clone())).await;

        assert_eq!(response.message, "Cache cleared successfully");
        assert_eq!(state.cache.snapshot().await.keys, 0);
    }

    #[tokio::test]
    async fn test_flush_key_handler_missing_key() {
        let state = seeded_state().await;

        let response = flush_key_handler(State(state), Path("cache:/nope".to_string())).await;

        assert!(response.success);
        assert!(!response.removed);
    }

    #[tokio::test]
    async fn test_flush_pattern_handler() {
        let state = seeded_state().await;
        let query = FlushPatternQuery {
            pattern: "listings:*".to_string(),
        };

        let response = flush_pattern_handler(State(state.clone()), Query(query))
            .await
            .unwrap();

        assert_eq!(response.removed, 2);
        assert_eq!(
            state.cache.keys(None).await.unwrap(),
            vec!["cache:/vehicles".to_string()]
        );
    }

    #[tokio::test]
    async fn test_flush_pattern_handler_invalid() {
        let state = seeded_state().await;
        let query = FlushPatternQuery {
            pattern: String::new(),
        };

        let result = flush_pattern_handler(State(state.clone()), Query(query)).await;

        assert!(matches!(result, Err(CacheError::InvalidPattern(_))));
        assert_eq!(state.cache.snapshot().await.keys, 3);
    }
}
