//! Country → currency → default price range lookups.
//!
//! Countries are matched by ISO code or display name, accent- and
//! case-insensitively, so both "SN" and "Sénégal" resolve to the same entry.

use serde::{Deserialize, Serialize};

use crate::text::fold;

/// A country the marketplace operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryInfo {
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Other accepted spellings (already folded).
    pub aliases: &'static [&'static str],
    /// ISO 4217 currency code.
    pub currency: &'static str,
}

/// Default nightly price bounds for a currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

const COUNTRIES: &[CountryInfo] = &[
    CountryInfo { code: "SN", name: "Sénégal", aliases: &["senegal"], currency: "XOF" },
    CountryInfo { code: "CI", name: "Côte d'Ivoire", aliases: &["cote divoire", "ivory coast"], currency: "XOF" },
    CountryInfo { code: "ML", name: "Mali", aliases: &[], currency: "XOF" },
    CountryInfo { code: "BF", name: "Burkina Faso", aliases: &[], currency: "XOF" },
    CountryInfo { code: "BJ", name: "Bénin", aliases: &["benin"], currency: "XOF" },
    CountryInfo { code: "TG", name: "Togo", aliases: &[], currency: "XOF" },
    CountryInfo { code: "NE", name: "Niger", aliases: &[], currency: "XOF" },
    CountryInfo { code: "GH", name: "Ghana", aliases: &[], currency: "GHS" },
    CountryInfo { code: "NG", name: "Nigeria", aliases: &[], currency: "NGN" },
    CountryInfo { code: "CM", name: "Cameroun", aliases: &["cameroon"], currency: "XAF" },
    CountryInfo { code: "GA", name: "Gabon", aliases: &[], currency: "XAF" },
    CountryInfo { code: "CG", name: "Congo", aliases: &[], currency: "XAF" },
    CountryInfo { code: "MA", name: "Maroc", aliases: &["morocco"], currency: "MAD" },
    CountryInfo { code: "FR", name: "France", aliases: &[], currency: "EUR" },
    CountryInfo { code: "US", name: "États-Unis", aliases: &["united states", "usa"], currency: "USD" },
];

const PRICE_RANGES: &[(&str, PriceRange)] = &[
    ("XOF", PriceRange { min: 10_000.0, max: 500_000.0 }),
    ("XAF", PriceRange { min: 10_000.0, max: 500_000.0 }),
    ("GHS", PriceRange { min: 150.0, max: 5_000.0 }),
    ("NGN", PriceRange { min: 15_000.0, max: 1_000_000.0 }),
    ("MAD", PriceRange { min: 200.0, max: 10_000.0 }),
    ("EUR", PriceRange { min: 20.0, max: 1_000.0 }),
    ("USD", PriceRange { min: 20.0, max: 1_000.0 }),
];

/// Find a country by ISO code, display name or alias.
pub fn resolve_country(input: &str) -> Option<&'static CountryInfo> {
    let folded = fold(input).replace('\'', "");
    if folded.is_empty() {
        return None;
    }
    COUNTRIES.iter().find(|c| {
        c.code.eq_ignore_ascii_case(&folded)
            || fold(c.name).replace('\'', "") == folded
            || c.aliases.iter().any(|a| *a == folded)
    })
}

/// Currency for a country, falling back to `fallback` for unknown or absent
/// countries.
pub fn currency_for_country(country: Option<&str>, fallback: &str) -> String {
    country
        .and_then(resolve_country)
        .map(|c| c.currency.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Default price range for a currency code.
pub fn default_price_range(currency: &str) -> Option<PriceRange> {
    PRICE_RANGES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(currency))
        .map(|(_, range)| *range)
}

/// Whether a currency code has a default price range.
pub fn is_known_currency(currency: &str) -> bool {
    default_price_range(currency).is_some()
}
