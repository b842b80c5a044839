use serde::{Deserialize, Serialize};

use crate::classify::Disposition;
use crate::listing::{AllItem, Kind};

/// Primary grouping dimension.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    #[default]
    Category,
    Location,
}

/// Identity of a section.
///
/// `category` and `disposition` are set in both modes; `country` and `city`
/// only in location mode. Place fields hold display values; the section key
/// is derived from their folded form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposition: Option<Disposition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// A titled bucket of items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    /// Deterministic, collision-free identifier for list diffing.
    pub key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub data: Vec<AllItem>,
    pub meta: GroupKey,
}
