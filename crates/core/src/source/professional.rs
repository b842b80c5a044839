//! Professional directory source.

use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{same_place, text_matches, ProfessionalFilter, ProfessionalStore};
use crate::classify::professional_category;
use crate::listing::{AllQuery, Paged, Professional};

/// In-memory professional directory implementing the store contract.
#[derive(Debug, Default)]
pub struct InMemoryProfessionalStore {
    items: RwLock<Vec<Professional>>,
}

impl InMemoryProfessionalStore {
    pub fn new(items: Vec<Professional>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub fn insert(&self, professional: Professional) {
        match self.items.write() {
            Ok(mut items) => items.push(professional),
            Err(poisoned) => poisoned.into_inner().push(professional),
        }
    }
}

impl ProfessionalStore for InMemoryProfessionalStore {
    fn list(&self, filter: &ProfessionalFilter) -> Vec<Professional> {
        let items = match self.items.read() {
            Ok(items) => items,
            Err(poisoned) => poisoned.into_inner(),
        };

        items
            .iter()
            .filter(|p| {
                // Category filters compare normalized specialty labels.
                filter.category.as_deref().map_or(true, |c| {
                    professional_category(Some(c))
                        == professional_category(
                            p.specialty.as_deref().or(p.category.as_deref()),
                        )
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
            .filter(|p| {
                filter
                    .rating_min
                    .map_or(true, |min| p.rating.is_some_and(|r| r >= min))
            })
            .cloned()
            .collect()
    }
}

/// Adapter turning the canonical query into a page of professionals.
///
/// Same shape as the property source, matching free text against the name.
/// Price bounds do not apply to professionals.
pub struct ProfessionalSource {
    store: Arc<dyn ProfessionalStore>,
}

impl ProfessionalSource {
    pub fn new(store: Arc<dyn ProfessionalStore>) -> Self {
        Self { store }
    }

    /// List one page of matching professionals. Always succeeds.
    pub fn list(&self, query: &AllQuery, per_page: u32) -> Paged<Professional> {
        let filter = ProfessionalFilter::from(query);
        let matched: Vec<Professional> = self
            .store
            .list(&filter)
            .into_iter()
            .filter(|p| text_matches(&query.q, &[Some(p.name.as_str())]))
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
            .collect();

        let page = Paged::from_all(matched, query.page, per_page);
        debug!(
            matched = page.total,
            returned = page.data.len(),
            page = page.page,
            "Professional source listed"
        );
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn professional(id: &str, name: &str, specialty: &str, city: &str) -> Professional {
        Professional {
            id: id.to_string(),
            name: name.to_string(),
            specialty: Some(specialty.to_string()),
            city: Some(city.to_string()),
            country: Some("Sénégal".to_string()),
            rating: Some(4.0),
            ..Default::default()
        }
    }

    fn store() -> InMemoryProfessionalStore {
        InMemoryProfessionalStore::new(vec![
            professional("a1", "Teranga Immobilier", "Agence immobilière", "Dakar"),
            professional("a2", "Awa Diop", "Agent immobilier", "Thiès"),
            professional("a3", "Salle Sokhna", "Espace événementiel", "Dakar"),
        ])
    }

    #[test]
    fn test_text_matches_name_only() {
        let source = ProfessionalSource::new(Arc::new(store()));

        let query = AllQuery {
            q: "awa".to_string(),
            ..Default::default()
        };
        let page = source.list(&query, 12);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, "a2");

        // City names are not part of the free-text match for professionals.
        let query = AllQuery {
            q: "thies".to_string(),
            ..Default::default()
        };
        assert!(source.list(&query, 12).is_empty());
    }

    #[test]
    fn test_city_filter() {
        let source = ProfessionalSource::new(Arc::new(store()));
        let query = AllQuery {
            city: Some("dakar".to_string()),
            ..Default::default()
        };
        assert_eq!(source.list(&query, 12).data.len(), 2);
    }

    #[test]
    fn test_price_bounds_ignored() {
        let source = ProfessionalSource::new(Arc::new(store()));
        let query = AllQuery {
            min_price: Some(1.0),
            ..Default::default()
        };
        assert_eq!(source.list(&query, 12).data.len(), 3);
    }

    #[test]
    fn test_store_category_filter_uses_normalized_labels() {
        let filter = ProfessionalFilter {
            category: Some("agency".to_string()),
            ..Default::default()
        };
        let found = store().list(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a1");
    }
}
