//! Listing Catalogue
//!
//! In-memory store of listings behind the cached `/listings` endpoints.

use chrono::Utc;

use crate::models::{Listing, NewListing};

// == Listing Catalogue ==
#[derive(Debug, Default)]
pub struct ListingCatalog {
    listings: Vec<Listing>,
    next_id: u64,
}

impl ListingCatalog {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Self {
            listings: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a catalogue pre-populated with a few sample stays.
    pub fn with_samples() -> Self {
        let mut catalog = Self::new();
        let samples = [
            ("Cozy Beachfront Cottage", "Goa", "India", 3500),
            ("Cedar Cabin in the Pines", "Manali", "India", 2500),
            ("Backwater Houseboat", "Alleppey", "India", 6000),
            ("Desert Camp under the Stars", "Jaisalmer", "India", 4200),
        ];
        for (title, location, country, price) in samples {
            catalog.insert(NewListing {
                title: title.to_string(),
                location: location.to_string(),
                country: country.to_string(),
                price,
            });
        }
        catalog
    }

    // == List ==
    /// All listings, optionally restricted to a location (case-insensitive).
    pub fn list(&self, location: Option<&str>) -> Vec<Listing> {
        self.listings
            .iter()
            .filter(|listing| location.map_or(true, |loc| listing.location.eq_ignore_ascii_case(loc)))
            .cloned()
            .collect()
    }

    // == Get ==
    pub fn get(&self, id: u64) -> Option<Listing> {
        self.listings.iter().find(|listing| listing.id == id).cloned()
    }

    // == Insert ==
    /// Adds a listing and returns it with its assigned id.
    pub fn insert(&mut self, new: NewListing) -> Listing {
        let listing = Listing {
            id: self.next_id.max(1),
            title: new.title.trim().to_string(),
            location: new.location.trim().to_string(),
            country: new.country.trim().to_string(),
            price: new.price,
            created_at: Utc::now(),
        };
        self.next_id = listing.id + 1;
        self.listings.push(listing.clone());
        listing
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
