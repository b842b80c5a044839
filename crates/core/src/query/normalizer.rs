use chrono::NaiveDate;
use tracing::debug;

use super::RawQuery;
use crate::config::AggregatorConfig;
use crate::listing::{AllQuery, Kind, SortOrder};
use crate::text::non_empty;

/// Turns [`RawQuery`] into [`AllQuery`] and sizes per-source slices.
///
/// Pure: never fails, never performs I/O. Anything it cannot interpret is
/// coerced to a safe default.
#[derive(Debug, Clone)]
pub struct Normalizer {
    default_page_size: u32,
    max_page_size: u32,
    min_per_source: u32,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&AggregatorConfig::default())
    }
}

impl Normalizer {
    pub fn new(config: &AggregatorConfig) -> Self {
        Self {
            default_page_size: config.default_page_size.max(1),
            max_page_size: config.max_page_size.max(config.default_page_size).max(1),
            min_per_source: config.min_per_source.max(1),
        }
    }

    pub fn normalize(&self, raw: &RawQuery) -> AllQuery {
        let mut min_price = raw.min_price.as_deref().and_then(parse_amount);
        let mut max_price = raw.max_price.as_deref().and_then(parse_amount);
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                std::mem::swap(&mut min_price, &mut max_price);
            }
        }

        let start_date = raw.start_date.as_deref().and_then(parse_date);
        let end_date = raw
            .end_date
            .as_deref()
            .and_then(parse_date)
            .filter(|end| start_date.map_or(true, |start| *end >= start));

        let page = raw
            .page
            .as_deref()
            .and_then(parse_int)
            .filter(|p| *p >= 1)
            .map_or(1, |p| p.min(u32::MAX as i64) as u32);

        let page_size = raw
            .page_size
            .as_deref()
            .and_then(parse_int)
            .filter(|s| *s >= 1)
            .map_or(self.default_page_size, |s| {
                s.min(self.max_page_size as i64) as u32
            });

        let query = AllQuery {
            q: normalize_text(raw.q.as_deref()).unwrap_or_default(),
            city: normalize_text(raw.city.as_deref()),
            country: normalize_text(raw.country.as_deref()),
            min_price,
            max_price,
            guests: raw
                .guests
                .as_deref()
                .and_then(parse_int)
                .filter(|g| *g >= 1)
                .map(|g| g.min(u32::MAX as i64) as u32),
            start_date,
            end_date,
            only: non_empty(raw.only.as_deref()).and_then(|o| o.parse::<Kind>().ok()),
            page,
            page_size,
            sort: non_empty(raw.sort.as_deref())
                .and_then(|s| s.parse::<SortOrder>().ok())
                .unwrap_or_default(),
        };

        debug!(q = %query.q, only = ?query.only, page = query.page, page_size = query.page_size, "Normalized query");
        query
    }

    /// Page size handed to each source.
    ///
    /// With `only` set the single source gets the whole page; otherwise the
    /// page is split evenly with a floor so no source starves.
    pub fn per_source(&self, query: &AllQuery) -> u32 {
        let page_size = query.page_size.max(1);
        if query.only.is_some() {
            return page_size;
        }
        let kinds = query.wanted_kinds().len() as u32;
        (page_size / kinds).max(self.min_per_source)
    }
}

fn normalize_text(text: Option<&str>) -> Option<String> {
    non_empty(text).map(|t| t.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
}

/// Parse a non-negative amount, tolerating thousands separators ("450 000").
fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '\u{202f}')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let date_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let query = Normalizer::default().normalize(&RawQuery::new());
        assert_eq!(query.q, "");
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 12);
        assert_eq!(query.sort, SortOrder::New);
        assert!(query.only.is_none());
    }

    #[test]
    fn test_text_is_trimmed_and_lowercased() {
        let raw = RawQuery::new()
            .with_q("  Villa   PISCINE ")
            .with_city(" Dakar ")
            .with_country("   ");
        let query = Normalizer::default().normalize(&raw);

        assert_eq!(query.q, "villa piscine");
        assert_eq!(query.city.as_deref(), Some("dakar"));
        assert!(query.country.is_none());
    }

    #[test]
    fn test_malformed_numbers_become_none() {
        let raw = RawQuery::new().with_price_range(Some("abc"), Some("450 000"));
        let query = Normalizer::default().normalize(&raw);

        assert!(query.min_price.is_none());
        assert_eq!(query.max_price, Some(450_000.0));
    }

    #[test]
    fn test_inverted_price_bounds_are_swapped() {
        let raw = RawQuery::new().with_price_range(Some("900"), Some("100"));
        let query = Normalizer::default().normalize(&raw);

        assert_eq!(query.min_price, Some(100.0));
        assert_eq!(query.max_price, Some(900.0));
    }

    #[test]
    fn test_out_of_range_page_coerced() {
        let raw = RawQuery::new().with_page("-3").with_page_size("0");
        let query = Normalizer::default().normalize(&raw);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 12);

        let raw = RawQuery::new().with_page_size("5000");
        let query = Normalizer::default().normalize(&raw);
        assert_eq!(query.page_size, 60);
    }

    #[test]
    fn test_dates() {
        let raw = RawQuery {
            start_date: Some("2026-12-20".to_string()),
            end_date: Some("2026-12-18T00:00:00Z".to_string()),
            ..Default::default()
        };
        let query = Normalizer::default().normalize(&raw);

        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2026, 12, 20));
        // End before start is dropped.
        assert!(query.end_date.is_none());
    }

    #[test]
    fn test_only_and_sort_parsing() {
        let raw = RawQuery::new().with_only("trip").with_sort("price_low");
        let query = Normalizer::default().normalize(&raw);
        assert_eq!(query.only, Some(Kind::Trip));
        assert_eq!(query.sort, SortOrder::PriceLow);

        let raw = RawQuery::new().with_only("vehicles").with_sort("cheapest");
        let query = Normalizer::default().normalize(&raw);
        assert!(query.only.is_none());
        assert_eq!(query.sort, SortOrder::New);
    }

    #[test]
    fn test_per_source_split() {
        let normalizer = Normalizer::default();

        let query = normalizer.normalize(&RawQuery::new().with_page_size("12"));
        assert_eq!(normalizer.per_source(&query), 4);

        let query = normalizer.normalize(&RawQuery::new().with_page_size("30"));
        assert_eq!(normalizer.per_source(&query), 10);

        // Floor applies when the split would starve a source.
        let query = normalizer.normalize(&RawQuery::new().with_page_size("6"));
        assert_eq!(normalizer.per_source(&query), 4);
    }

    #[test]
    fn test_per_source_with_only() {
        let normalizer = Normalizer::default();
        let query = normalizer.normalize(&RawQuery::new().with_only("property").with_page_size("6"));
        assert_eq!(normalizer.per_source(&query), 6);
    }
}
