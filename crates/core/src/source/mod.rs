//! Source adapters for the three listing kinds.
//!
//! Property and professional data come from synchronous local stores that
//! never fail. Trips come from a remote API behind the [`TripApi`] trait;
//! [`TripSource`] wraps it and turns every failure into an empty page so one
//! unavailable backend never fails a whole query.

mod http_trip;
mod professional;
mod property;
mod trip;
mod types;

pub use http_trip::HttpTripApi;
pub use professional::{InMemoryProfessionalStore, ProfessionalSource};
pub use property::{InMemoryPropertyStore, PropertySource};
pub use trip::TripSource;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::defaults::resolve_country;
use crate::listing::{Paged, Professional, Property, Trip};
use crate::text::fold;

/// Errors raised by the remote trip API.
///
/// These never leave [`TripSource`]; they are logged and counted there.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Trip API connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Trip API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse trip API response: {0}")]
    Parse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Trip API not configured: {0}")]
    NotConfigured(String),
}

/// Read contract of the local property store.
pub trait PropertyStore: Send + Sync {
    /// List properties matching the filter. Never fails.
    fn list(&self, filter: &PropertyFilter) -> Vec<Property>;
}

/// Read contract of the professional directory.
pub trait ProfessionalStore: Send + Sync {
    /// List professionals matching the filter. Never fails.
    fn list(&self, filter: &ProfessionalFilter) -> Vec<Professional>;
}

/// Read contract of the remote trip/hotel inventory.
#[async_trait]
pub trait TripApi: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Popular stays matching the query.
    async fn list_popular(&self, query: &TripQuery) -> Result<Paged<Trip>, SourceError>;

    /// Recommended stays matching the query.
    async fn list_recommended(&self, query: &TripQuery) -> Result<Paged<Trip>, SourceError>;
}

/// Case- and accent-insensitive place comparison. Countries also match
/// across ISO code and display name ("sn" == "Sénégal").
pub(crate) fn same_place(wanted: &str, actual: Option<&str>) -> bool {
    let Some(actual) = actual else {
        return false;
    };
    if fold(wanted) == fold(actual) {
        return true;
    }
    match (resolve_country(wanted), resolve_country(actual)) {
        (Some(a), Some(b)) => a.code == b.code,
        _ => false,
    }
}

/// Whether `price` satisfies the optional bounds. Items without a price are
/// excluded as soon as any bound is set.
pub(crate) fn within_bounds(price: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(price) = price else {
        return false;
    };
    min.map_or(true, |m| price >= m) && max.map_or(true, |m| price <= m)
}

/// Free-text match: `q` appears in any of the fields.
pub(crate) fn text_matches(q: &str, fields: &[Option<&str>]) -> bool {
    let needle = fold(q);
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .flatten()
        .any(|field| fold(field).contains(&needle))
}
