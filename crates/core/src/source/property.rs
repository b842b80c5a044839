//! Property source backed by a local collection.

use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{same_place, text_matches, within_bounds, PropertyFilter, PropertyStore};
use crate::listing::{AllQuery, Paged, Property};
use crate::text::fold;

/// In-memory property collection implementing the store contract.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    items: RwLock<Vec<Property>>,
}

impl InMemoryPropertyStore {
    pub fn new(items: Vec<Property>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Add a property to the collection.
    pub fn insert(&self, property: Property) {
        match self.items.write() {
            Ok(mut items) => items.push(property),
            Err(poisoned) => poisoned.into_inner().push(property),
        }
    }
}

impl PropertyStore for InMemoryPropertyStore {
    fn list(&self, filter: &PropertyFilter) -> Vec<Property> {
        let items = match self.items.read() {
            Ok(items) => items,
            Err(poisoned) => poisoned.into_inner(),
        };

        items
            .iter()
            .filter(|p| {
                filter.category.as_deref().map_or(true, |c| {
                    let wanted = fold(c);
                    [p.category.as_deref(), p.property_type.as_deref()]
                        .iter()
                        .flatten()
                        .any(|v| fold(v).contains(&wanted))
                })
            })
            .filter(|p| {
                filter
                    .country
                    .as_deref()
                    .map_or(true, |c| same_place(c, p.country.as_deref()))
            })
            .filter(|p| {
                filter
                    .city
                    .as_deref()
                    .map_or(true, |c| same_place(c, p.city.as_deref()))
            })
            .filter(|p| within_bounds(p.price, filter.price_min, filter.price_max))
            .filter(|p| {
                filter.rating_min.map_or(true, |min| {
                    p.provider
                        .as_ref()
                        .and_then(|pr| pr.rating)
                        .is_some_and(|r| r >= min)
                })
            })
            .cloned()
            .collect()
    }
}

/// Adapter turning the canonical query into a page of properties.
///
/// Applies its own predicates on top of the store: free text against
/// title, city and country; exact city and country; price bounds.
pub struct PropertySource {
    store: Arc<dyn PropertyStore>,
}

impl PropertySource {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    /// List one page of matching properties. Always succeeds.
    pub fn list(&self, query: &AllQuery, per_page: u32) -> Paged<Property> {
        let filter = PropertyFilter::from(query);
        let matched: Vec<Property> = self
            .store
            .list(&filter)
            .into_iter()
            .filter(|p| {
                text_matches(
                    &query.q,
                    &[Some(p.title.as_str()), p.city.as_deref(), p.country.as_deref()],
                )
            })
            .filter(|p| {
                query
                    .city
                    .as_deref()
                    .map_or(true, |c| same_place(c, p.city.as_deref()))
            })
            .filter(|p| {
                query
                    .country
                    .as_deref()
                    .map_or(true, |c| same_place(c, p.country.as_deref()))
            })
            .filter(|p| within_bounds(p.price, query.min_price, query.max_price))
            .collect();

        let page = Paged::from_all(matched, query.page, per_page);
        debug!(
            matched = page.total,
            returned = page.data.len(),
            page = page.page,
            "Property source listed"
        );
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Provider;

    fn property(id: &str, title: &str, city: &str, country: &str, price: f64) -> Property {
        Property {
            id: id.to_string(),
            title: title.to_string(),
            city: Some(city.to_string()),
            country: Some(country.to_string()),
            price: Some(price),
            ..Default::default()
        }
    }

    fn source() -> PropertySource {
        let store = InMemoryPropertyStore::new(vec![
            property("p1", "Villa Almadies", "Dakar", "Sénégal", 450_000.0),
            property("p2", "Studio Plateau", "Dakar", "Sénégal", 80_000.0),
            property("p3", "Appartement Osu", "Accra", "Ghana", 120_000.0),
        ]);
        PropertySource::new(Arc::new(store))
    }

    #[test]
    fn test_lists_everything_without_filters() {
        let page = source().list(&AllQuery::default(), 12);
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_text_matches_title_city_country() {
        let source = source();

        let by_title = AllQuery {
            q: "villa".to_string(),
            ..Default::default()
        };
        assert_eq!(source.list(&by_title, 12).data.len(), 1);

        let by_country = AllQuery {
            q: "ghana".to_string(),
            ..Default::default()
        };
        let page = source.list(&by_country, 12);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, "p3");
    }

    #[test]
    fn test_city_and_price_bounds() {
        let query = AllQuery {
            city: Some("dakar".to_string()),
            max_price: Some(100_000.0),
            ..Default::default()
        };
        let page = source().list(&query, 12);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, "p2");
    }

    #[test]
    fn test_country_code_matches_name() {
        let query = AllQuery {
            country: Some("sn".to_string()),
            ..Default::default()
        };
        assert_eq!(source().list(&query, 12).data.len(), 2);
    }

    #[test]
    fn test_no_match_is_empty_page() {
        let query = AllQuery {
            q: "penthouse".to_string(),
            ..Default::default()
        };
        let page = source().list(&query, 12);
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_paging() {
        let query = AllQuery {
            page: 2,
            ..Default::default()
        };
        let page = source().list(&query, 2);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_store_rating_and_category_filter() {
        let mut rated = property("p4", "Villa Saly", "Saly", "Sénégal", 300_000.0);
        rated.property_type = Some("Villa".to_string());
        rated.provider = Some(Provider {
            name: Some("Agence Teranga".to_string()),
            rating: Some(4.8),
        });
        let store = InMemoryPropertyStore::new(vec![
            rated,
            property("p5", "Studio", "Saly", "Sénégal", 50_000.0),
        ]);

        let filter = PropertyFilter {
            category: Some("villa".to_string()),
            rating_min: Some(4.0),
            ..Default::default()
        };
        let found = store.list(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p4");
    }
}
