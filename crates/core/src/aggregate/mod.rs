//! Fusion and ranking across the three sources.
//!
//! [`Aggregator::list_all`] fans a query out to the wanted sources
//! concurrently, concatenates their pages in the fixed order property,
//! professional, trip, and applies one global ordering.

mod fusion;
mod ranking;

pub use fusion::Aggregator;
pub use ranking::{
    compare_for_sort, compare_price, compare_rating_desc, compare_within_section, sort_items,
    Comparator,
};
