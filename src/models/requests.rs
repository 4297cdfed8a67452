//! Request DTOs for the API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

/// Query for `DELETE /admin/cache/pattern`
#[derive(Debug, Clone, Deserialize)]
pub struct FlushPatternQuery {
    /// Wildcard pattern, e.g. `listings:*`
    pub pattern: String,
}

/// Optional key filter for `GET /admin/cache`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeysQuery {
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Optional filter for `GET /listings`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingsQuery {
    /// Case-insensitive location match
    #[serde(default)]
    pub location: Option<String>,
}

/// Request body for `POST /listings`
#[derive(Debug, Clone, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub location: String,
    pub country: String,
    /// Nightly price in rupees
    pub price: u32,
}

impl NewListing {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("Title cannot be empty".to_string());
        }
        if self.title.len() > 120 {
            return Some("Title exceeds maximum length of 120 characters".to_string());
        }
        if self.location.trim().is_empty() {
            return Some("Location cannot be empty".to_string());
        }
        if self.country.trim().is_empty() {
            return Some("Country cannot be empty".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str) -> NewListing {
        NewListing {
            title: title.to_string(),
            location: "Manali".to_string(),
            country: "India".to_string(),
            price: 2500,
        }
    }

    #[test]
    fn test_new_listing_deserialize() {
        let json = r#"{"title":"Cedar Cabin","location":"Manali","country":"India","price":2500}"#;
        let req: NewListing = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "Cedar Cabin");
        assert_eq!(req.price, 2500);
    }

    #[test]
    fn test_validate_empty_title() {
        assert!(listing("  ").validate().is_some());
    }

    #[test]
    fn test_validate_long_title() {
        assert!(listing(&"x".repeat(121)).validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(listing("Cedar Cabin").validate().is_none());
    }

    #[test]
    fn test_keys_query_pattern_optional() {
        let query: KeysQuery = serde_json::from_str("{}").unwrap();
        assert!(query.pattern.is_none());
    }
}
