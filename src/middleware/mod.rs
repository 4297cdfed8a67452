//! Middleware Module
//!
//! Request interceptors wired into the router:
//! - `detect_session` - tags requests from authenticated sessions
//! - `cache_middleware` - serves and captures cached GET responses

mod body;
pub mod cache;
pub mod session;

pub use cache::{
    cache_middleware, default_cache_key, path_and_query, CacheMiddleware, CacheOptions,
    KeyGenerator, X_CACHE, X_CACHE_KEY,
};
pub use session::{detect_session, has_session, AuthenticatedSession, SessionConfig};
