//! API Routes
//!
//! Configures the Axum router: cached listings endpoints and the cache admin
//! endpoints.

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, flush_all_handler, flush_key_handler, flush_pattern_handler, AppState,
};
use super::listings::{
    create_listing_handler, get_listing_handler, list_listings_handler, listings_cache_key,
};
use crate::middleware::{
    cache_middleware, detect_session, CacheMiddleware, CacheOptions, SessionConfig,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /listings` - List listings (cached)
/// - `POST /listings` - Create a listing, invalidating cached listings
/// - `GET /listings/:id` - Listing details (cached)
/// - `GET /admin/cache` - Cache counters and keys
/// - `DELETE /admin/cache` - Flush everything
/// - `DELETE /admin/cache/keys/:key` - Flush one key
/// - `DELETE /admin/cache/pattern?pattern=` - Flush keys matching a wildcard
///
/// # Middleware
/// - Session detection: runs before the cache so personalized requests bypass it
/// - Response cache: listings routes only
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let listings_cache = CacheMiddleware::new(
        state.cache.clone(),
        CacheOptions::new(state.cache_duration)
            .with_max_body_bytes(state.max_body_bytes)
            .with_key_generator(listings_cache_key),
    );

    let listings = Router::new()
        .route(
            "/listings",
            get(list_listings_handler).post(create_listing_handler),
        )
        .route("/listings/:id", get(get_listing_handler))
        .route_layer(middleware::from_fn_with_state(
            listings_cache,
            cache_middleware,
        ));

    let admin = Router::new()
        .route(
            "/admin/cache",
            get(cache_stats_handler).delete(flush_all_handler),
        )
        .route("/admin/cache/keys/:key", delete(flush_key_handler))
        .route("/admin/cache/pattern", delete(flush_pattern_handler));

    let session = SessionConfig::new(&state.session_cookie);

    Router::new()
        .merge(listings)
        .merge(admin)
        .layer(middleware::from_fn_with_state(session, detect_session))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::new(ResponseCache::new()))
    }

    #[tokio::test]
    async fn test_admin_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin/cache")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("x-cache").is_none());
    }

    #[tokio::test]
    async fn test_listings_endpoint_is_cached() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/listings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-cache"], "MISS");
        assert_eq!(response.headers()["x-cache-key"], "listings:/listings");
    }

    #[tokio::test]
    async fn test_listing_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/listings/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("x-cache").is_none());
    }
}
