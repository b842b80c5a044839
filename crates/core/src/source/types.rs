//! Filters and queries passed to the individual sources.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::listing::{AllQuery, SortOrder};

/// Filter accepted by a [`PropertyStore`](super::PropertyStore).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    pub category: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub rating_min: Option<f64>,
}

impl From<&AllQuery> for PropertyFilter {
    fn from(query: &AllQuery) -> Self {
        Self {
            category: None,
            country: query.country.clone(),
            city: query.city.clone(),
            price_min: query.min_price,
            price_max: query.max_price,
            rating_min: None,
        }
    }
}

/// Filter accepted by a [`ProfessionalStore`](super::ProfessionalStore).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfessionalFilter {
    pub category: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub rating_min: Option<f64>,
}

impl From<&AllQuery> for ProfessionalFilter {
    fn from(query: &AllQuery) -> Self {
        Self {
            category: None,
            country: query.country.clone(),
            city: query.city.clone(),
            rating_min: None,
        }
    }
}

/// Query sent to the remote trip API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TripQuery {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub sort: SortOrder,
}

impl TripQuery {
    /// Project the canonical query onto the trip API, asking for `per_page`
    /// items.
    pub fn from_all(query: &AllQuery, per_page: u32) -> Self {
        Self {
            q: query.q.clone(),
            city: query.city.clone(),
            country: query.country.clone(),
            min_price: query.min_price,
            max_price: query.max_price,
            guests: query.guests,
            start_date: query.start_date,
            end_date: query.end_date,
            page: query.page.max(1),
            page_size: per_page.max(1),
            sort: query.sort,
        }
    }
}
