use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::listing::SortOrder;

/// Where the user wants to go.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Filter state of the trips domain, as persisted in presets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default)]
    pub destination: Destination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    pub currency: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_min: Option<f64>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl TripFilters {
    /// Empty filters priced in `currency`.
    pub fn initial(currency: impl Into<String>) -> Self {
        Self {
            q: None,
            destination: Destination::default(),
            start_date: None,
            end_date: None,
            guests: None,
            price_min: None,
            price_max: None,
            currency: currency.into(),
            amenities: Vec::new(),
            rating_min: None,
            sort: SortOrder::default(),
        }
    }
}

/// Partial update for [`TripFilters`], merged shallowly.
///
/// `None` leaves a field untouched. For optional fields, `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltersPatch {
    pub q: Option<Option<String>>,
    pub destination: Option<Destination>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub guests: Option<Option<u32>>,
    pub price_min: Option<Option<f64>>,
    pub price_max: Option<Option<f64>>,
    pub currency: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub rating_min: Option<Option<f64>>,
    pub sort: Option<SortOrder>,
}

impl FiltersPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn q(mut self, q: Option<String>) -> Self {
        self.q = Some(q);
        self
    }

    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn guests(mut self, guests: Option<u32>) -> Self {
        self.guests = Some(guests);
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = Some(min);
        self.price_max = Some(max);
        self
    }

    pub fn rating_min(mut self, rating_min: Option<f64>) -> Self {
        self.rating_min = Some(rating_min);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub(crate) fn apply(self, filters: &mut TripFilters) {
        if let Some(q) = self.q {
            filters.q = q;
        }
        if let Some(destination) = self.destination {
            filters.destination = destination;
        }
        if let Some(start) = self.start_date {
            filters.start_date = start;
        }
        if let Some(end) = self.end_date {
            filters.end_date = end;
        }
        if let Some(guests) = self.guests {
            filters.guests = guests;
        }
        if let Some(min) = self.price_min {
            filters.price_min = min;
        }
        if let Some(max) = self.price_max {
            filters.price_max = max;
        }
        if let Some(currency) = self.currency {
            filters.currency = currency;
        }
        if let Some(amenities) = self.amenities {
            filters.amenities = amenities;
        }
        if let Some(rating_min) = self.rating_min {
            filters.rating_min = rating_min;
        }
        if let Some(sort) = self.sort {
            filters.sort = sort;
        }
    }
}

/// A named, persisted snapshot of filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub q: TripFilters,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}
