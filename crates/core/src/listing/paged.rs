//! Page envelope returned by sources and by the aggregator.

use serde::{Deserialize, Serialize};

/// Total reported by the aggregator, which cannot sum heterogeneous source
/// counts exactly. Callers keep loading until a page comes back empty.
pub const UNKNOWN_TOTAL: u64 = 9_999;

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
}

impl<T> Paged<T> {
    /// The page substituted for a failed source.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            page: 1,
            total_pages: 1,
            total: 0,
        }
    }

    /// Cut page `page` (1-based) of `per_page` items out of a fully known
    /// result list. Pages past the end come back empty with `page` clamped
    /// to `total_pages`.
    pub fn from_all(all: Vec<T>, page: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total = all.len() as u64;
        let total_pages = (total.div_ceil(per_page as u64)).max(1) as u32;

        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let data: Vec<T> = all
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Self {
            data,
            page: page.min(total_pages),
            total_pages,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
