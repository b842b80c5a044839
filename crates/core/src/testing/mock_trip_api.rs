//! Mock trip API for testing.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::listing::{Paged, Trip};
use crate::source::{same_place, within_bounds, SourceError, TripApi, TripQuery};

/// A recorded call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTripQuery {
    /// `list_popular` or `list_recommended`.
    pub operation: &'static str,
    /// The query that was sent.
    pub query: TripQuery,
    /// When the call was made.
    pub timestamp: Instant,
}

/// Mock implementation of the [`TripApi`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable trips, filtered by place and price
/// - Track queries for assertions
/// - Simulate failures, slow responses and oversized pages
///
/// Clones share state, so a test can keep a handle after passing one to
/// the aggregator.
#[derive(Debug, Clone, Default)]
pub struct MockTripApi {
    trips: Arc<RwLock<Vec<Trip>>>,
    queries: Arc<RwLock<Vec<RecordedTripQuery>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<SourceError>>>,
    /// If true, every call fails.
    failing: Arc<RwLock<bool>>,
    delay: Arc<RwLock<Option<Duration>>>,
    /// If true, all matching trips are returned regardless of page size.
    ignore_page_size: Arc<RwLock<bool>>,
}

impl MockTripApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inventory returned by subsequent calls.
    pub async fn set_trips(&self, trips: Vec<Trip>) {
        *self.trips.write().await = trips;
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: SourceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every call fail until reset.
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    /// Delay every response.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Return whole result sets, like a backend that ignores `pageSize`.
    pub async fn set_ignore_page_size(&self, ignore: bool) {
        *self.ignore_page_size.write().await = ignore;
    }

    /// Get recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedTripQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of calls made.
    pub async fn call_count(&self) -> usize {
        self.queries.read().await.len()
    }

    async fn respond(
        &self,
        operation: &'static str,
        query: &TripQuery,
    ) -> Result<Vec<Trip>, SourceError> {
        self.queries.write().await.push(RecordedTripQuery {
            operation,
            query: query.clone(),
            timestamp: Instant::now(),
        });

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        if *self.failing.read().await {
            return Err(SourceError::ConnectionFailed("mock trip api is down".to_string()));
        }

        let trips = self.trips.read().await;
        Ok(trips
            .iter()
            .filter(|t| query.city.as_deref().map_or(true, |c| same_place(c, t.city.as_deref())))
            .filter(|t| {
                query
                    .country
                    .as_deref()
                    .map_or(true, |c| same_place(c, t.country.as_deref()))
            })
            .filter(|t| within_bounds(t.price_per_night, query.min_price, query.max_price))
            .filter(|t| query.guests.map_or(true, |g| t.max_guests.map_or(true, |m| m >= g)))
            .cloned()
            .collect())
    }

    async fn paginate(&self, trips: Vec<Trip>, query: &TripQuery) -> Paged<Trip> {
        if *self.ignore_page_size.read().await {
            let total = trips.len() as u64;
            return Paged {
                data: trips,
                page: 1,
                total_pages: 1,
                total,
            };
        }
        Paged::from_all(trips, query.page, query.page_size)
    }
}

#[async_trait]
impl TripApi for MockTripApi {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_popular(&self, query: &TripQuery) -> Result<Paged<Trip>, SourceError> {
        let trips = self.respond("list_popular", query).await?;
        Ok(self.paginate(trips, query).await)
    }

    async fn list_recommended(&self, query: &TripQuery) -> Result<Paged<Trip>, SourceError> {
        let mut trips = self.respond("list_recommended", query).await?;
        trips.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        });
        Ok(self.paginate(trips, query).await)
    }
}
