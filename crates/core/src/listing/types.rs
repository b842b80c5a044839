//! Types for listings and the canonical query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity type of a listing item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Property,
    Professional,
    Trip,
}

impl Kind {
    /// All kinds in fan-out concatenation order.
    pub const ALL: [Kind; 3] = [Kind::Property, Kind::Professional, Kind::Trip];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Property => "property",
            Kind::Professional => "professional",
            Kind::Trip => "trip",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "property" | "properties" => Ok(Kind::Property),
            "professional" | "professionals" | "pro" => Ok(Kind::Professional),
            "trip" | "trips" => Ok(Kind::Trip),
            other => Err(format!("unknown kind: {}", other)),
        }
    }
}

/// Global ordering applied to a fused page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    New,
    Popular,
    Rating,
    PriceLow,
    PriceHigh,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::New => "new",
            SortOrder::Popular => "popular",
            SortOrder::Rating => "rating",
            SortOrder::PriceLow => "price_low",
            SortOrder::PriceHigh => "price_high",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(SortOrder::New),
            "popular" => Ok(SortOrder::Popular),
            "rating" => Ok(SortOrder::Rating),
            "price_low" => Ok(SortOrder::PriceLow),
            "price_high" => Ok(SortOrder::PriceHigh),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Owner or agency behind a property listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// A real-estate listing.
///
/// The free-text fields (`property_type`, `category`, `status`, ...) are not
/// schema-enforced upstream; the classifier interprets them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

/// An entry of the professional directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Professional {
    pub id: String,
    pub name: String,
    /// Free-text specialty ("Agence immobilière", "hotel booking", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub verified: bool,
}

/// A hotel or stay from the remote trip inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<u32>,
}

/// A listing of any kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllItem {
    Property(Property),
    Professional(Professional),
    Trip(Trip),
}

impl AllItem {
    pub fn kind(&self) -> Kind {
        match self {
            AllItem::Property(_) => Kind::Property,
            AllItem::Professional(_) => Kind::Professional,
            AllItem::Trip(_) => Kind::Trip,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AllItem::Property(p) => &p.id,
            AllItem::Professional(p) => &p.id,
            AllItem::Trip(t) => &t.id,
        }
    }

    /// Comparable price: `price` for properties, `price_per_night` for trips.
    /// Professionals never have one.
    pub fn price(&self) -> Option<f64> {
        match self {
            AllItem::Property(p) => p.price,
            AllItem::Professional(_) => None,
            AllItem::Trip(t) => t.price_per_night,
        }
    }

    /// Comparable rating: the provider's for properties, the item's own otherwise.
    pub fn rating(&self) -> Option<f64> {
        match self {
            AllItem::Property(p) => p.provider.as_ref().and_then(|pr| pr.rating),
            AllItem::Professional(p) => p.rating,
            AllItem::Trip(t) => t.rating,
        }
    }

    pub fn city(&self) -> Option<&str> {
        match self {
            AllItem::Property(p) => p.city.as_deref(),
            AllItem::Professional(p) => p.city.as_deref(),
            AllItem::Trip(t) => t.city.as_deref(),
        }
    }

    pub fn country(&self) -> Option<&str> {
        match self {
            AllItem::Property(p) => p.country.as_deref(),
            AllItem::Professional(p) => p.country.as_deref(),
            AllItem::Trip(t) => t.country.as_deref(),
        }
    }
}

impl From<Property> for AllItem {
    fn from(p: Property) -> Self {
        AllItem::Property(p)
    }
}

impl From<Professional> for AllItem {
    fn from(p: Professional) -> Self {
        AllItem::Professional(p)
    }
}

impl From<Trip> for AllItem {
    fn from(t: Trip) -> Self {
        AllItem::Trip(t)
    }
}

/// Canonical request handed to the aggregator.
///
/// Text fields are trimmed and lower-cased by the normalizer; `page` and
/// `page_size` are always at least 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllQuery {
    /// Free-text search, empty when absent.
    #[serde(default)]
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
    /// Restrict the fan-out to a single kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<Kind>,
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub sort: SortOrder,
}

impl Default for AllQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            city: None,
            country: None,
            min_price: None,
            max_price: None,
            guests: None,
            start_date: None,
            end_date: None,
            only: None,
            page: 1,
            page_size: 12,
            sort: SortOrder::New,
        }
    }
}

impl AllQuery {
    /// Kinds to fan out to, in concatenation order.
    pub fn wanted_kinds(&self) -> Vec<Kind> {
        match self.only {
            Some(kind) => vec![kind],
            None => Kind::ALL.to_vec(),
        }
    }

    pub fn wants(&self, kind: Kind) -> bool {
        self.only.map_or(true, |only| only == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_item_serializes_kind_tag() {
        let item = AllItem::Trip(Trip {
            id: "t1".to_string(),
            title: "Hotel Teranga".to_string(),
            city: Some("Dakar".to_string()),
            ..Default::default()
        });

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "trip");
        assert_eq!(json["title"], "Hotel Teranga");
    }

    #[test]
    fn test_all_item_deserializes_by_tag() {
        let json = r#"{"kind": "property", "id": "p1", "title": "Villa", "type": "villa", "price": 450000}"#;
        let item: AllItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.kind(), Kind::Property);
        assert_eq!(item.price(), Some(450000.0));
        match item {
            AllItem::Property(p) => assert_eq!(p.property_type.as_deref(), Some("villa")),
            other => panic!("expected property, got {:?}", other),
        }
    }

    #[test]
    fn test_comparable_fields_per_kind() {
        let property = AllItem::Property(Property {
            price: Some(100.0),
            provider: Some(Provider {
                name: None,
                rating: Some(4.5),
            }),
            ..Default::default()
        });
        let professional = AllItem::Professional(Professional {
            rating: Some(3.0),
            ..Default::default()
        });

        assert_eq!(property.rating(), Some(4.5));
        assert_eq!(professional.price(), None);
        assert_eq!(professional.rating(), Some(3.0));
    }

    #[test]
    fn test_wanted_kinds() {
        let mut query = AllQuery::default();
        assert_eq!(query.wanted_kinds(), Kind::ALL.to_vec());
        assert!(query.wants(Kind::Trip));

        query.only = Some(Kind::Trip);
        assert_eq!(query.wanted_kinds(), vec![Kind::Trip]);
        assert!(!query.wants(Kind::Property));
    }

    #[test]
    fn test_parse_kind_and_sort() {
        assert_eq!("Trips".parse::<Kind>().unwrap(), Kind::Trip);
        assert!("vehicle".parse::<Kind>().is_err());
        assert_eq!("price_low".parse::<SortOrder>().unwrap(), SortOrder::PriceLow);
        assert_eq!(
            serde_json::to_string(&SortOrder::PriceHigh).unwrap(),
            "\"price_high\""
        );
    }
}
