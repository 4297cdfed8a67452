//! WanderLust Cache - HTTP response caching for the WanderLust API
//!
//! Provides a TTL response cache with wildcard invalidation and hit/miss
//! accounting, the axum middleware that fronts cacheable routes with it, and
//! the admin endpoints that inspect and flush it.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::ResponseCache;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
