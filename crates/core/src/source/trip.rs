//! Degrading adapter over the remote trip API.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use super::{SourceError, TripApi, TripQuery};
use crate::listing::{AllQuery, Kind, Paged, Trip};
use crate::metrics;

/// Trip source adapter.
///
/// Every failure of the underlying API (timeout, non-2xx, malformed
/// payload) is logged, counted, and replaced by [`Paged::empty`].
pub struct TripSource {
    api: Arc<dyn TripApi>,
}

impl TripSource {
    pub fn new(api: Arc<dyn TripApi>) -> Self {
        Self { api }
    }

    /// Popular trips for the query. Never fails.
    pub async fn list(&self, query: &AllQuery, per_page: u32) -> Paged<Trip> {
        let trip_query = TripQuery::from_all(query, per_page);
        let start = Instant::now();
        let result = self.api.list_popular(&trip_query).await;
        self.settle(result, "list_popular", trip_query.page_size, start)
    }

    /// Recommended trips for the query. Never fails.
    pub async fn recommended(&self, query: &AllQuery, per_page: u32) -> Paged<Trip> {
        let trip_query = TripQuery::from_all(query, per_page);
        let start = Instant::now();
        let result = self.api.list_recommended(&trip_query).await;
        self.settle(result, "list_recommended", trip_query.page_size, start)
    }

    fn settle(
        &self,
        result: Result<Paged<Trip>, SourceError>,
        operation: &str,
        per_page: u32,
        start: Instant,
    ) -> Paged<Trip> {
        let elapsed = start.elapsed().as_secs_f64();
        metrics::EXTERNAL_SERVICE_DURATION
            .with_label_values(&[self.api.name(), operation])
            .observe(elapsed);

        match result {
            Ok(mut page) => {
                metrics::EXTERNAL_SERVICE_REQUESTS
                    .with_label_values(&[self.api.name(), operation, "success"])
                    .inc();
                // The remote side does not always honour the page size.
                page.data.truncate(per_page as usize);
                page.page = page.page.max(1);
                page.total_pages = page.total_pages.max(1);
                debug!(
                    backend = self.api.name(),
                    operation,
                    returned = page.data.len(),
                    total_pages = page.total_pages,
                    "Trip source listed"
                );
                page
            }
            Err(e) => {
                metrics::EXTERNAL_SERVICE_REQUESTS
                    .with_label_values(&[self.api.name(), operation, "error"])
                    .inc();
                metrics::SOURCE_FAILURES
                    .with_label_values(&[Kind::Trip.as_str()])
                    .inc();
                warn!(
                    backend = self.api.name(),
                    operation,
                    error = %e,
                    "Trip source failed, returning empty page"
                );
                Paged::empty()
            }
        }
    }
}
