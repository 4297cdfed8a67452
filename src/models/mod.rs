//! Request and Response models for the API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod listing;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use listing::Listing;
pub use requests::{FlushPatternQuery, KeysQuery, ListingsQuery, NewListing};
pub use responses::{
    CacheStatsResponse, ErrorResponse, FlushKeyResponse, FlushPatternResponse, FlushResponse,
};
