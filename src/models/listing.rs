//! Listing model served by the listings endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A bookable stay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: u64,
    pub title: String,
    pub location: String,
    pub country: String,
    /// Nightly price in rupees
    pub price: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_serializes_camel_case() {
        let listing = Listing {
            id: 1,
            title: "Houseboat".to_string(),
            location: "Alleppey".to_string(),
            country: "India".to_string(),
            price: 6000,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["id"], 1);
        assert!(json.get("createdAt").is_some());
    }
}
