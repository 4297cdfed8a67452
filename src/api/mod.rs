//! API Module
//!
//! HTTP handlers and routing.
//!
//! # Endpoints
//! - `GET /listings`, `GET /listings/:id` - Cached listings reads
//! - `POST /listings` - Create a listing
//! - `GET /admin/cache` - Cache statistics and keys
//! - `DELETE /admin/cache` - Flush the cache
//! - `DELETE /admin/cache/keys/:key` - Flush one key
//! - `DELETE /admin/cache/pattern` - Flush keys matching a wildcard

pub mod handlers;
pub mod listings;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
