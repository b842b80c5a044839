//! Text folding shared by matching, lookups and section ordering.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Lowercase `text`, trim it, and strip diacritics ("Sénégal" -> "senegal").
///
/// Input is decomposed first, so precomposed and combining-mark spellings
/// fold to the same string.
pub fn fold(text: &str) -> String {
    text.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == '’' { '\'' } else { c })
        .collect()
}

/// Returns the trimmed value, or `None` when it is empty.
pub fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}

/// Locale-style comparison: accent- and case-insensitive first, then the raw
/// strings so the ordering stays total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}
