//! Testing utilities and mock implementations.
//!
//! The mock trip API stands in for the remote inventory so aggregation can
//! be exercised end to end without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_core::testing::{fixtures, MockTripApi};
//!
//! let api = MockTripApi::new();
//! api.set_trips(vec![fixtures::trip("t1", "Accra", 90.0, 4.1)]).await;
//! api.set_next_error(SourceError::Timeout).await;
//! ```

mod mock_trip_api;

pub use mock_trip_api::{MockTripApi, RecordedTripQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::listing::{Professional, Property, Provider, Trip};

    /// A property listing with a type, a place and a price.
    pub fn property(id: &str, property_type: &str, city: &str, country: &str, price: f64) -> Property {
        Property {
            id: id.to_string(),
            title: format!("{} à {}", property_type, city),
            city: Some(city.to_string()),
            country: Some(country.to_string()),
            price: Some(price),
            currency: Some("XOF".to_string()),
            property_type: Some(property_type.to_string()),
            ..Default::default()
        }
    }

    /// A property whose provider carries a rating.
    pub fn rated_property(
        id: &str,
        property_type: &str,
        city: &str,
        country: &str,
        price: f64,
        rating: f64,
    ) -> Property {
        Property {
            provider: Some(Provider {
                name: Some("Agence Teranga".to_string()),
                rating: Some(rating),
            }),
            ..property(id, property_type, city, country, price)
        }
    }

    /// A hotel stay priced per night.
    pub fn trip(id: &str, city: &str, price_per_night: f64, rating: f64) -> Trip {
        Trip {
            id: id.to_string(),
            title: format!("Hôtel {}", id),
            city: Some(city.to_string()),
            country: None,
            price_per_night: Some(price_per_night),
            currency: Some("XOF".to_string()),
            rating: Some(rating),
            max_guests: Some(4),
        }
    }

    /// A directory entry.
    pub fn professional(id: &str, name: &str, specialty: &str, city: &str, rating: f64) -> Professional {
        Professional {
            id: id.to_string(),
            name: name.to_string(),
            specialty: Some(specialty.to_string()),
            category: None,
            city: Some(city.to_string()),
            country: None,
            rating: Some(rating),
            verified: true,
        }
    }
}
