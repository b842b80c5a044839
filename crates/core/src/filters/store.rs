//! Filter store: current filters, country defaults, and presets.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{FiltersPatch, KeyValueStore, Preset, StorageError, TripFilters};
use crate::config::FiltersConfig;
use crate::defaults::{currency_for_country, default_price_range};
use crate::metrics;
use crate::query::RawQuery;
use crate::text::non_empty;

/// Holds one domain's filters and its persisted presets.
pub struct FilterStore {
    filters: TripFilters,
    initial: TripFilters,
    kv: Arc<dyn KeyValueStore>,
    presets_key: String,
    last_used_key: String,
    preset_cap: usize,
    default_currency: String,
}

impl FilterStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, config: &FiltersConfig) -> Self {
        let initial = TripFilters::initial(config.default_currency.clone());
        Self {
            filters: initial.clone(),
            initial,
            kv,
            presets_key: format!("{}:presets", config.domain),
            last_used_key: format!("{}:filters:last_used", config.domain),
            preset_cap: config.preset_cap.max(1),
            default_currency: config.default_currency.clone(),
        }
    }

    pub fn filters(&self) -> &TripFilters {
        &self.filters
    }

    /// Shallow-merge a partial update.
    pub fn set(&mut self, patch: FiltersPatch) {
        patch.apply(&mut self.filters);
    }

    /// Select a country (ISO code or name).
    ///
    /// Derives the currency, and fills `price_min`/`price_max` from the
    /// currency's default range only where they are unset.
    pub fn set_country(&mut self, country: &str) {
        let country = non_empty(Some(country)).map(str::to_string);
        let currency = currency_for_country(country.as_deref(), &self.default_currency);

        if let Some(range) = default_price_range(&currency) {
            if self.filters.price_min.is_none() {
                self.filters.price_min = Some(range.min);
            }
            if self.filters.price_max.is_none() {
                self.filters.price_max = Some(range.max);
            }
        }

        debug!(country = ?country, currency = %currency, "Country selected");
        self.filters.destination.country = country;
        self.filters.currency = currency;
    }

    /// Add the amenity if absent, remove it if present.
    pub fn toggle_amenity(&mut self, key: &str) {
        let amenities = &mut self.filters.amenities;
        match amenities.iter().position(|a| a == key) {
            Some(pos) => {
                amenities.remove(pos);
            }
            None => amenities.push(key.to_string()),
        }
    }

    /// Restore the initial filters, priced in the no-country currency.
    pub fn reset(&mut self) {
        self.filters = self.initial.clone();
        self.filters.currency = currency_for_country(None, &self.default_currency);
    }

    /// Current filters as UI-level query state for the normalizer.
    pub fn query(&self) -> RawQuery {
        let f = &self.filters;
        RawQuery {
            q: f.q.clone(),
            city: f.destination.city.clone(),
            country: f.destination.country.clone(),
            min_price: f.price_min.map(|v| v.to_string()),
            max_price: f.price_max.map(|v| v.to_string()),
            guests: f.guests.map(|g| g.to_string()),
            start_date: f.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: f.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            only: None,
            page: None,
            page_size: None,
            sort: Some(f.sort.as_str().to_string()),
        }
    }

    /// Persist the current filters as "last used".
    pub fn save_preset(&self) {
        if let Err(e) = self.write_json(&self.last_used_key, &self.filters) {
            warn!(key = %self.last_used_key, error = %e, "Failed to save last used filters");
        }
    }

    /// Load the "last used" filters, if any were saved and are readable.
    pub fn restore_last_used(&mut self) -> bool {
        match self.read_json::<TripFilters>(&self.last_used_key, '{', '}') {
            Some(filters) => {
                self.filters = filters;
                true
            }
            None => false,
        }
    }

    /// Save the current filters under `name`, most recent first. The oldest
    /// presets beyond the cap are evicted.
    pub fn save_named_preset(&self, name: &str) -> Preset {
        let preset = Preset {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            q: self.filters.clone(),
            created_at: Utc::now().timestamp_millis(),
        };

        let mut presets = self.list_presets();
        presets.insert(0, preset.clone());
        let evicted = presets.len().saturating_sub(self.preset_cap);
        presets.truncate(self.preset_cap);

        if let Err(e) = self.write_json(&self.presets_key, &presets) {
            warn!(key = %self.presets_key, error = %e, "Failed to save preset");
        }
        info!(id = %preset.id, name = %preset.name, evicted, "Saved preset");
        preset
    }

    /// Saved presets, most recent first.
    pub fn list_presets(&self) -> Vec<Preset> {
        let Some(values) = self.read_json::<Vec<serde_json::Value>>(&self.presets_key, '[', ']')
        else {
            return Vec::new();
        };

        let total = values.len();
        let mut presets: Vec<Preset> = values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();

        let dropped = total - presets.len();
        if dropped > 0 {
            metrics::STORAGE_CORRUPTIONS
                .with_label_values(&["preset"])
                .inc_by(dropped as u64);
            warn!(key = %self.presets_key, dropped, "Dropped corrupted presets");
            if let Err(e) = self.write_json(&self.presets_key, &presets) {
                warn!(key = %self.presets_key, error = %e, "Failed to rewrite presets");
            }
        }

        presets.truncate(self.preset_cap);
        presets
    }

    /// Replace the current filters with a preset's. Returns whether it existed.
    pub fn apply_preset(&mut self, id: &str) -> bool {
        match self.list_presets().into_iter().find(|p| p.id == id) {
            Some(preset) => {
                debug!(id, name = %preset.name, "Applied preset");
                self.filters = preset.q;
                true
            }
            None => false,
        }
    }

    /// Delete a preset. Returns whether it existed.
    pub fn delete_preset(&self, id: &str) -> bool {
        let mut presets = self.list_presets();
        let before = presets.len();
        presets.retain(|p| p.id != id);
        if presets.len() == before {
            return false;
        }

        if let Err(e) = self.write_json(&self.presets_key, &presets) {
            warn!(key = %self.presets_key, error = %e, "Failed to delete preset");
        }
        info!(id, "Deleted preset");
        true
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.set(key, &json)
    }

    /// Read a JSON record whose text must be wrapped in `open`/`close`.
    ///
    /// The shape is sniffed before parsing; anything unreadable is removed
    /// from storage and reported as absent.
    fn read_json<T: DeserializeOwned>(&self, key: &str, open: char, close: char) -> Option<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read filter storage");
                return None;
            }
        };

        let trimmed = raw.trim();
        let parsed = if trimmed.starts_with(open) && trimmed.ends_with(close) {
            serde_json::from_str::<T>(trimmed).map_err(|e| e.to_string())
        } else {
            Err("unexpected shape".to_string())
        };

        match parsed {
            Ok(value) => Some(value),
            Err(reason) => {
                metrics::STORAGE_CORRUPTIONS
                    .with_label_values(&["record"])
                    .inc();
                warn!(key, reason = %reason, "Discarding corrupted filter record");
                if let Err(e) = self.kv.remove(key) {
                    warn!(key, error = %e, "Failed to remove corrupted record");
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Destination, MemoryKvStore};
    use crate::listing::SortOrder;

    fn store() -> (FilterStore, Arc<MemoryKvStore>) {
        let kv = Arc::new(MemoryKvStore::new());
        let store = FilterStore::new(kv.clone(), &FiltersConfig::default());
        (store, kv)
    }

    #[test]
    fn test_set_country_backfills_unset_bounds() {
        let (mut store, _) = store();
        store.set_country("SN");

        let f = store.filters();
        assert_eq!(f.destination.country.as_deref(), Some("SN"));
        assert_eq!(f.currency, "XOF");
        assert_eq!(f.price_min, Some(10_000.0));
        assert_eq!(f.price_max, Some(500_000.0));
    }

    #[test]
    fn test_set_country_accepts_decomposed_name() {
        let kv = Arc::new(MemoryKvStore::new());
        let config = FiltersConfig {
            default_currency: "EUR".to_string(),
            ..Default::default()
        };
        let mut store = FilterStore::new(kv, &config);
        store.set_country("Se\u{301}ne\u{301}gal");

        assert_eq!(store.filters().currency, "XOF");
        assert_eq!(store.filters().price_min, Some(10_000.0));
    }

    #[test]
    fn test_set_country_is_idempotent() {
        let (mut store, _) = store();
        store.set_country("GH");
        let once = (store.filters().price_min, store.filters().price_max);
        store.set_country("GH");
        let twice = (store.filters().price_min, store.filters().price_max);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_country_never_overwrites_explicit_bounds() {
        let (mut store, _) = store();
        store.set(FiltersPatch::new().price_range(Some(25_000.0), None));
        store.set_country("SN");

        assert_eq!(store.filters().price_min, Some(25_000.0));
        assert_eq!(store.filters().price_max, Some(500_000.0));

        store.set_country("GH");
        assert_eq!(store.filters().currency, "GHS");
        assert_eq!(store.filters().price_min, Some(25_000.0));
        assert_eq!(store.filters().price_max, Some(500_000.0));
    }

    #[test]
    fn test_cleared_bounds_are_backfilled_again() {
        let (mut store, _) = store();
        store.set_country("SN");
        store.set(FiltersPatch::new().price_range(None, None));
        store.set_country("GH");

        assert_eq!(store.filters().price_min, Some(150.0));
        assert_eq!(store.filters().price_max, Some(5_000.0));
    }

    #[test]
    fn test_toggle_amenity() {
        let (mut store, _) = store();
        store.toggle_amenity("wifi");
        store.toggle_amenity("pool");
        assert_eq!(store.filters().amenities, vec!["wifi", "pool"]);

        store.toggle_amenity("wifi");
        assert_eq!(store.filters().amenities, vec!["pool"]);
    }

    #[test]
    fn test_reset() {
        let (mut store, _) = store();
        store.set_country("GH");
        store.toggle_amenity("wifi");
        store.reset();

        let f = store.filters();
        assert!(f.destination.country.is_none());
        assert!(f.amenities.is_empty());
        assert!(f.price_min.is_none());
        assert_eq!(f.currency, "XOF");
    }

    #[test]
    fn test_named_presets_most_recent_first() {
        let (mut store, _) = store();
        store.set(FiltersPatch::new().guests(Some(2)));
        let first = store.save_named_preset("Deux personnes");
        store.set(FiltersPatch::new().guests(Some(4)));
        let second = store.save_named_preset("  Famille ");

        let presets = store.list_presets();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].id, second.id);
        assert_eq!(presets[0].name, "Famille");
        assert_eq!(presets[1].id, first.id);

        assert!(store.apply_preset(&first.id));
        assert_eq!(store.filters().guests, Some(2));
        assert!(!store.apply_preset("missing"));
    }

    #[test]
    fn test_preset_cap() {
        let (mut store, _) = store();
        let mut saved = Vec::new();
        for i in 0..25 {
            store.set(FiltersPatch::new().guests(Some(i)));
            saved.push(store.save_named_preset(&format!("preset {}", i)));
        }

        let presets = store.list_presets();
        assert_eq!(presets.len(), 20);
        let expected: Vec<&str> = saved.iter().rev().take(20).map(|p| p.id.as_str()).collect();
        let actual: Vec<&str> = presets.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_delete_preset() {
        let (store, _) = store();
        let preset = store.save_named_preset("A");
        assert!(store.delete_preset(&preset.id));
        assert!(!store.delete_preset(&preset.id));
        assert!(store.list_presets().is_empty());
    }

    #[test]
    fn test_last_used_roundtrip() {
        let (mut store, kv) = store();
        store.set(
            FiltersPatch::new()
                .destination(Destination {
                    country: Some("SN".to_string()),
                    city: Some("Saly".to_string()),
                })
                .sort(SortOrder::PriceLow),
        );
        store.save_preset();

        let mut restored = FilterStore::new(kv, &FiltersConfig::default());
        assert!(restored.restore_last_used());
        assert_eq!(restored.filters(), store.filters());
    }

    #[test]
    fn test_corrupted_presets_read_as_empty() {
        let (store, kv) = store();
        kv.set("trips:presets", "{not an array").unwrap();

        assert!(store.list_presets().is_empty());
        // The corrupted record is dropped.
        assert!(kv.get("trips:presets").unwrap().is_none());

        // Saving still works afterwards.
        store.save_named_preset("fresh");
        assert_eq!(store.list_presets().len(), 1);
    }

    #[test]
    fn test_corrupted_entry_is_dropped_others_kept() {
        let (store, kv) = store();
        let good = store.save_named_preset("good");
        let raw = kv.get("trips:presets").unwrap().unwrap();
        let patched = raw.replacen('[', r#"[{"id": 42},"#, 1);
        kv.set("trips:presets", &patched).unwrap();

        let presets = store.list_presets();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].id, good.id);
    }

    #[test]
    fn test_corrupted_last_used_ignored() {
        let (mut store, kv) = store();
        kv.set("trips:filters:last_used", "[]").unwrap();
        assert!(!store.restore_last_used());
        assert_eq!(store.filters(), &TripFilters::initial("XOF"));
    }

    #[test]
    fn test_query_feeds_normalizer() {
        let (mut store, _) = store();
        store.set(FiltersPatch::new().q(Some("  Hôtel plage ".to_string())));
        store.set_country("SN");

        let raw = store.query();
        assert_eq!(raw.country.as_deref(), Some("SN"));
        assert_eq!(raw.min_price.as_deref(), Some("10000"));

        let query = crate::query::Normalizer::default().normalize(&raw);
        assert_eq!(query.q, "hôtel plage");
        assert_eq!(query.min_price, Some(10_000.0));
        assert_eq!(query.max_price, Some(500_000.0));
    }
}
