//! Listings Handlers
//!
//! The read endpoints sit behind the response cache; creating a listing
//! invalidates every cached `listings:` response.

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::api::AppState;
use crate::error::{CacheError, Result};
use crate::middleware::path_and_query;
use crate::models::{Listing, ListingsQuery, NewListing};

/// Key prefix for cached listings responses.
pub const LISTINGS_KEY_PREFIX: &str = "listings:";

/// Cache key generator for the listings routes.
pub fn listings_cache_key(req: &Request) -> Result<String> {
    Ok(format!("{}{}", LISTINGS_KEY_PREFIX, path_and_query(req)))
}

/// Handler for GET /listings
pub async fn list_listings_handler(
    State(state): State<AppState>,
    Query(query): Query<ListingsQuery>,
) -> Json<Vec<Listing>> {
    let catalog = state.listings.read().await;
    Json(catalog.list(query.location.as_deref()))
}

/// Handler for GET /listings/:id
pub async fn get_listing_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Listing>> {
    let catalog = state.listings.read().await;
    catalog
        .get(id)
        .map(Json)
        .ok_or_else(|| CacheError::NotFound(format!("Listing {}", id)))
}

/// Handler for POST /listings
///
/// Stores the listing, then drops cached listings responses so the next
/// read sees it.
pub async fn create_listing_handler(
    State(state): State<AppState>,
    Json(req): Json<NewListing>,
) -> Result<(StatusCode, Json<Listing>)> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let listing = state.listings.write().await.insert(req);
    let invalidated = state
        .cache
        .flush_pattern(&format!("{}*", LISTINGS_KEY_PREFIX))
        .await?;
    info!(id = listing.id, invalidated, "Listing created");

    Ok((StatusCode::CREATED, Json(listing)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CachedResponse, ResponseCache};
    use axum::body::Body;

    #[test]
    fn test_listings_cache_key() {
        let req = axum::http::Request::builder()
            .uri("/listings?location=Goa")
            .body(Body::empty())
            .unwrap();
        assert_eq!(listings_cache_key(&req).unwrap(), "listings:/listings?location=Goa");
    }

    #[tokio::test]
    async fn test_get_listing_not_found() {
        let state = AppState::new(ResponseCache::new());

        let result = get_listing_handler(State(state), Path(999)).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_listings_filter() {
        let state = AppState::new(ResponseCache::new());
        let query = ListingsQuery {
            location: Some("Goa".to_string()),
        };

        let Json(listings) = list_listings_handler(State(state), Query(query)).await;
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].location, "Goa");
    }

    #[tokio::test]
    async fn test_create_listing_invalidates_listing_keys() {
        let state = AppState::new(ResponseCache::new());
        state
            .cache
            .set("listings:/listings", CachedResponse::from("[]"), 300)
            .await;
        state
            .cache
            .set("cache:/vehicles", CachedResponse::from("[]"), 300)
            .await;

        let req = NewListing {
            title: "Tea Estate Bungalow".to_string(),
            location: "Munnar".to_string(),
            country: "India".to_string(),
            price: 5200,
        };
        let (status, Json(listing)) = create_listing_handler(State(state.clone()), Json(req))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(listing.location, "Munnar");
        assert_eq!(
            state.cache.keys(None).await.unwrap(),
            vec!["cache:/vehicles".to_string()]
        );
    }

    #[tokio::test]
    async fn test_create_listing_invalid() {
        let state = AppState::new(ResponseCache::new());
        let req = NewListing {
            title: String::new(),
            location: "Goa".to_string(),
            country: "India".to_string(),
            price: 100,
        };

        let result = create_listing_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
