use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::ranking::sort_items;
use crate::config::AggregatorConfig;
use crate::group::{group_items, GroupMode, Section};
use crate::listing::{AllItem, AllQuery, Kind, Paged, Trip, UNKNOWN_TOTAL};
use crate::metrics;
use crate::query::{Normalizer, RawQuery};
use crate::source::{
    ProfessionalSource, ProfessionalStore, PropertySource, PropertyStore, TripApi, TripSource,
};

/// Fans a query out to the listing sources and fuses the results.
///
/// Holds no per-request state, so independent `list_all` calls can run
/// concurrently on one instance.
pub struct Aggregator {
    properties: PropertySource,
    professionals: ProfessionalSource,
    trips: TripSource,
    normalizer: Normalizer,
    trip_timeout: Option<Duration>,
}

impl Aggregator {
    /// Create an aggregator over the given stores with default settings.
    pub fn new(
        properties: Arc<dyn PropertyStore>,
        professionals: Arc<dyn ProfessionalStore>,
        trips: Arc<dyn TripApi>,
    ) -> Self {
        Self {
            properties: PropertySource::new(properties),
            professionals: ProfessionalSource::new(professionals),
            trips: TripSource::new(trips),
            normalizer: Normalizer::default(),
            trip_timeout: None,
        }
    }

    /// Apply paging and timeout settings.
    pub fn with_config(mut self, config: &AggregatorConfig) -> Self {
        self.normalizer = Normalizer::new(config);
        self.trip_timeout = config.trip_timeout_ms.map(Duration::from_millis);
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Fetch one fused page.
    ///
    /// Never fails: a failing trip source contributes an empty slice.
    /// `total` is [`UNKNOWN_TOTAL`]; keep paging until `data` is empty.
    pub async fn list_all(&self, query: &AllQuery) -> Paged<AllItem> {
        let start = Instant::now();
        metrics::LIST_ALL_TOTAL.inc();

        let per_source = self.normalizer.per_source(query);
        debug!(
            kinds = ?query.wanted_kinds(),
            per_source,
            page = query.page,
            sort = ?query.sort,
            "Starting fan-out"
        );

        // The trip call is polled first so its request is in flight while the
        // local sources run.
        let trip_future = async {
            if query.wants(Kind::Trip) {
                Some(self.fetch_trips(query, per_source).await)
            } else {
                None
            }
        };
        let local_future = async {
            let properties = query
                .wants(Kind::Property)
                .then(|| self.properties.list(query, per_source));
            let professionals = query
                .wants(Kind::Professional)
                .then(|| self.professionals.list(query, per_source));
            (properties, professionals)
        };
        let (trips, (properties, professionals)) =
            futures::future::join(trip_future, local_future).await;

        let mut total_pages = 1;
        let mut data: Vec<AllItem> = Vec::new();

        if let Some(page) = properties {
            record_slice(Kind::Property, &page);
            total_pages = total_pages.max(page.total_pages);
            data.extend(page.data.into_iter().map(AllItem::Property));
        }
        if let Some(page) = professionals {
            record_slice(Kind::Professional, &page);
            total_pages = total_pages.max(page.total_pages);
            data.extend(page.data.into_iter().map(AllItem::Professional));
        }
        if let Some(page) = trips {
            record_slice(Kind::Trip, &page);
            total_pages = total_pages.max(page.total_pages);
            data.extend(page.data.into_iter().map(AllItem::Trip));
        }

        sort_items(&mut data, query.sort);

        let elapsed = start.elapsed();
        metrics::FANOUT_DURATION.observe(elapsed.as_secs_f64());
        info!(
            items = data.len(),
            page = query.page,
            total_pages,
            duration_ms = elapsed.as_millis() as u64,
            "Fused listing page"
        );

        Paged {
            data,
            page: query.page.max(1),
            total_pages,
            total: UNKNOWN_TOTAL,
        }
    }

    /// Normalize raw UI filters, fetch the fused page, and group it.
    pub async fn sections(&self, raw: &RawQuery, mode: GroupMode) -> Vec<Section> {
        let query = self.normalizer.normalize(raw);
        let page = self.list_all(&query).await;
        group_items(&page.data, mode)
    }

    /// Recommended trips for a rail, with the same degrade policy.
    pub async fn recommended_trips(&self, query: &AllQuery) -> Paged<Trip> {
        let per_page = query.page_size.max(1);
        self.trips.recommended(query, per_page).await
    }

    async fn fetch_trips(&self, query: &AllQuery, per_source: u32) -> Paged<Trip> {
        let Some(limit) = self.trip_timeout else {
            return self.trips.list(query, per_source).await;
        };

        match tokio::time::timeout(limit, self.trips.list(query, per_source)).await {
            Ok(page) => page,
            Err(_) => {
                metrics::SOURCE_FAILURES
                    .with_label_values(&[Kind::Trip.as_str()])
                    .inc();
                warn!(
                    timeout_ms = limit.as_millis() as u64,
                    "Trip source timed out, returning empty page"
                );
                Paged::empty()
            }
        }
    }
}

fn record_slice<T>(kind: Kind, page: &Paged<T>) {
    metrics::SOURCE_ITEMS
        .with_label_values(&[kind.as_str()])
        .observe(page.data.len() as f64);
}
