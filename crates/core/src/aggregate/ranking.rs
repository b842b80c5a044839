//! Comparators over heterogeneous items.
//!
//! Missing fields are explicit `None` branches: a missing rating counts as 0,
//! a missing price always sorts after every priced item.

use std::cmp::Ordering;

use crate::listing::{AllItem, SortOrder};

/// Rating, highest first. Missing ratings count as 0.
pub fn compare_rating_desc(a: &AllItem, b: &AllItem) -> Ordering {
    let ra = a.rating().unwrap_or(0.0);
    let rb = b.rating().unwrap_or(0.0);
    rb.total_cmp(&ra)
}

/// Price in the requested direction. Items without a price go last in both
/// directions.
pub fn compare_price(a: &AllItem, b: &AllItem, ascending: bool) -> Ordering {
    match (a.price(), b.price()) {
        (Some(pa), Some(pb)) => {
            if ascending {
                pa.total_cmp(&pb)
            } else {
                pb.total_cmp(&pa)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ordering inside a section: best rated first, cheapest first on ties.
pub fn compare_within_section(a: &AllItem, b: &AllItem) -> Ordering {
    compare_rating_desc(a, b).then_with(|| compare_price(a, b, true))
}

/// Ordering function over fused items.
pub type Comparator = fn(&AllItem, &AllItem) -> Ordering;

fn price_low(a: &AllItem, b: &AllItem) -> Ordering {
    compare_price(a, b, true)
}

fn price_high(a: &AllItem, b: &AllItem) -> Ordering {
    compare_price(a, b, false)
}

/// Comparator for a global sort order; `None` keeps concatenation order.
pub fn compare_for_sort(sort: SortOrder) -> Option<Comparator> {
    let cmp: Comparator = match sort {
        SortOrder::PriceLow => price_low,
        SortOrder::PriceHigh => price_high,
        SortOrder::Rating => compare_rating_desc,
        SortOrder::New | SortOrder::Popular => return None,
    };
    Some(cmp)
}

/// Sort in place with the global comparator. Stable, so equal items keep
/// their fan-out order.
pub fn sort_items(items: &mut [AllItem], sort: SortOrder) {
    if let Some(cmp) = compare_for_sort(sort) {
        items.sort_by(cmp);
    }
}
