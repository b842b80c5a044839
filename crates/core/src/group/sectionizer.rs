//! Bucketing of fused items into sections.
//!
//! Every item lands in exactly one section: classification never fails, so
//! an item with nothing recognizable still gets an "Autre" bucket.

use std::collections::HashMap;

use tracing::debug;

use super::{GroupKey, GroupMode, Section};
use crate::aggregate::compare_within_section;
use crate::classify::{category, disposition, professional_category};
use crate::defaults::resolve_country;
use crate::listing::{AllItem, Kind};
use crate::text::{fold, locale_cmp, non_empty};

/// Pseudo-category shared by every trip.
pub const TRIP_CATEGORY: &str = "Hôtels & séjours";

const KEY_SEPARATOR: &str = "|";
const UNKNOWN_PLACE: &str = "Localisation inconnue";
const MANY_PLACES: &str = "Plusieurs localisations";

/// Partition `items` into sections.
///
/// Sections are ordered by title (accent- and case-insensitive), items
/// within a section by rating descending then price ascending.
pub fn group_items(items: &[AllItem], mode: GroupMode) -> Vec<Section> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut sections: Vec<Section> = Vec::new();

    for item in items {
        let meta = group_key(item, mode);
        let key = bucket_key(&meta);

        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                let (title, subtitle) = describe(&meta, mode);
                sections.push(Section {
                    key: key.clone(),
                    title,
                    subtitle,
                    data: Vec::new(),
                    meta,
                });
                index.insert(key, sections.len() - 1);
                sections.len() - 1
            }
        };
        sections[slot].data.push(item.clone());
    }

    for section in &mut sections {
        section.data.sort_by(compare_within_section);
        if mode == GroupMode::Category {
            section.subtitle = shared_place(&section.data);
        }
    }

    sections.sort_by(|a, b| {
        locale_cmp(&a.title, &b.title)
            .then_with(|| {
                locale_cmp(
                    a.subtitle.as_deref().unwrap_or(""),
                    b.subtitle.as_deref().unwrap_or(""),
                )
            })
            .then_with(|| a.key.cmp(&b.key))
    });

    debug!(
        items = items.len(),
        sections = sections.len(),
        mode = ?mode,
        "Grouped items"
    );
    sections
}

/// Compute the group identity of one item.
pub fn group_key(item: &AllItem, mode: GroupMode) -> GroupKey {
    let (category, disposition) = match item {
        AllItem::Property(p) => (category(p).label().to_string(), disposition(p)),
        AllItem::Professional(p) => (
            professional_category(p.specialty.as_deref().or(p.category.as_deref()))
                .label()
                .to_string(),
            None,
        ),
        AllItem::Trip(_) => (TRIP_CATEGORY.to_string(), None),
    };

    let (country, city) = match mode {
        GroupMode::Category => (None, None),
        GroupMode::Location => (display_country(item.country()), display_city(item.city())),
    };

    GroupKey {
        kind: item.kind(),
        category: Some(category),
        disposition,
        country,
        city,
    }
}

/// `[kind, category, disposition, country, city]`, each component
/// percent-encoded so the separator never appears inside one.
fn bucket_key(meta: &GroupKey) -> String {
    let parts = [
        meta.kind.as_str().to_string(),
        meta.category.clone().unwrap_or_default(),
        meta.disposition
            .map(|d| d.as_str().to_string())
            .unwrap_or_default(),
        meta.country.as_deref().map(place_key).unwrap_or_default(),
        meta.city.as_deref().map(fold).unwrap_or_default(),
    ];
    parts
        .iter()
        .map(|p| urlencoding::encode(p).into_owned())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

fn place_key(country: &str) -> String {
    resolve_country(country)
        .map(|c| c.code.to_lowercase())
        .unwrap_or_else(|| fold(country))
}

fn display_country(country: Option<&str>) -> Option<String> {
    non_empty(country).map(|c| {
        resolve_country(c)
            .map(|info| info.name.to_string())
            .unwrap_or_else(|| c.to_string())
    })
}

fn display_city(city: Option<&str>) -> Option<String> {
    non_empty(city).map(str::to_string)
}

fn kind_prefix(kind: Kind) -> &'static str {
    match kind {
        Kind::Property => "Propriétés",
        Kind::Professional => "Professionnels",
        Kind::Trip => "Hébergements",
    }
}

fn place_label(city: Option<&str>, country: Option<&str>) -> String {
    match (city, country) {
        (Some(city), Some(country)) => format!("{}, {}", city, country),
        (Some(city), None) => city.to_string(),
        (None, Some(country)) => country.to_string(),
        (None, None) => UNKNOWN_PLACE.to_string(),
    }
}

fn describe(meta: &GroupKey, mode: GroupMode) -> (String, Option<String>) {
    let category = meta.category.as_deref().unwrap_or("Autre");
    let primary = match mode {
        GroupMode::Category => category.to_string(),
        GroupMode::Location => place_label(meta.city.as_deref(), meta.country.as_deref()),
    };

    let mut title = format!("{} • {}", kind_prefix(meta.kind), primary);
    if let Some(disposition) = meta.disposition {
        title.push_str(" • ");
        title.push_str(disposition.label());
    }

    // Category mode subtitles depend on the items and are filled in later.
    let subtitle = match mode {
        GroupMode::Category => None,
        GroupMode::Location => Some(category.to_string()),
    };
    (title, subtitle)
}

/// The place shared by every item, or a "many places" marker.
fn shared_place(items: &[AllItem]) -> Option<String> {
    let mut places = items.iter().map(|item| {
        let country = display_country(item.country());
        let city = display_city(item.city());
        (
            city.as_deref().map(fold),
            country.as_deref().map(place_key),
            place_label(city.as_deref(), country.as_deref()),
        )
    });

    let (first_city, first_country, label) = places.next()?;
    let all_same = places.all(|(city, country, _)| city == first_city && country == first_country);
    if !all_same {
        return Some(MANY_PLACES.to_string());
    }
    if first_city.is_none() && first_country.is_none() {
        return None;
    }
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_villa_and_trip_in_category_mode() {
        let items = vec![
            AllItem::from(fixtures::property("p1", "villa", "Accra", "Ghana", 450_000.0)),
            AllItem::from(fixtures::trip("t1", "Accra", 90.0, 4.0)),
        ];

        let sections = group_items(&items, GroupMode::Category);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Hébergements • Hôtels & séjours", "Propriétés • Villa"]
        );
        assert_eq!(sections[1].subtitle.as_deref(), Some("Accra, Ghana"));
    }

    #[test]
    fn test_location_mode_keeps_categories_apart() {
        let items = vec![
            AllItem::from(fixtures::property("p1", "villa", "Dakar", "Sénégal", 1.0)),
            AllItem::from(fixtures::property("p2", "studio", "Dakar", "Sénégal", 1.0)),
        ];

        let sections = group_items(&items, GroupMode::Location);
        assert_eq!(sections.len(), 2);
        assert_ne!(sections[0].key, sections[1].key);
        assert!(sections
            .iter()
            .all(|s| s.title == "Propriétés • Dakar, Sénégal"));
        let subtitles: Vec<&str> = sections
            .iter()
            .filter_map(|s| s.subtitle.as_deref())
            .collect();
        assert_eq!(subtitles, vec!["Studio", "Villa"]);
    }

    #[test]
    fn test_location_mode_merges_spellings() {
        let items = vec![
            AllItem::from(fixtures::property("p1", "villa", "Dakar", "Sénégal", 1.0)),
            AllItem::from(fixtures::property("p2", "villa", " dakar", "SN", 2.0)),
        ];

        let sections = group_items(&items, GroupMode::Location);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].data.len(), 2);
    }

    #[test]
    fn test_location_mode_merges_decomposed_spelling() {
        let items = vec![
            AllItem::from(fixtures::property("p1", "villa", "Dakar", "Sénégal", 1.0)),
            AllItem::from(fixtures::property(
                "p2",
                "villa",
                "Dakar",
                "Se\u{301}ne\u{301}gal",
                2.0,
            )),
        ];

        let sections = group_items(&items, GroupMode::Location);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].data.len(), 2);
    }

    #[test]
    fn test_category_mode_merges_locations() {
        let items = vec![
            AllItem::from(fixtures::property("p1", "villa", "Dakar", "Sénégal", 1.0)),
            AllItem::from(fixtures::property("p2", "villa", "Accra", "Ghana", 2.0)),
        ];

        let sections = group_items(&items, GroupMode::Category);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].subtitle.as_deref(), Some(MANY_PLACES));
        assert!(sections[0].meta.city.is_none());
    }

    #[test]
    fn test_disposition_in_title_and_key() {
        let mut sale = fixtures::property("p1", "villa", "Dakar", "Sénégal", 1.0);
        sale.status = Some("À vendre".to_string());
        let mut rent = fixtures::property("p2", "villa", "Dakar", "Sénégal", 1.0);
        rent.status = Some("À louer".to_string());

        let sections = group_items(
            &[AllItem::from(sale), AllItem::from(rent)],
            GroupMode::Category,
        );
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Propriétés • Villa • À louer", "Propriétés • Villa • À vendre"]
        );
    }

    #[test]
    fn test_unclassifiable_item_still_grouped() {
        let item = AllItem::from(crate::listing::Property {
            id: "x".to_string(),
            title: "???".to_string(),
            ..Default::default()
        });

        let sections = group_items(&[item], GroupMode::Location);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Propriétés • Localisation inconnue");
        assert_eq!(sections[0].subtitle.as_deref(), Some("Autre"));
        assert!(sections[0].meta.disposition.is_none());
    }

    #[test]
    fn test_professionals_grouped_by_specialty() {
        let items = vec![
            AllItem::from(fixtures::professional("a1", "A", "Agence immobilière", "Dakar", 4.0)),
            AllItem::from(fixtures::professional("a2", "B", "Plombier", "Dakar", 4.0)),
        ];
        let sections = group_items(&items, GroupMode::Category);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Professionnels • Agences immobilières",
                "Professionnels • Professionnel"
            ]
        );
    }

    #[test]
    fn test_key_components_are_escaped() {
        let a = GroupKey {
            kind: Kind::Property,
            category: Some("Villa".to_string()),
            disposition: None,
            country: None,
            city: Some("a|b".to_string()),
        };
        let b = GroupKey {
            city: Some("a".to_string()),
            country: Some("b".to_string()),
            ..a.clone()
        };
        assert_ne!(bucket_key(&a), bucket_key(&b));
        assert_eq!(bucket_key(&a).matches(KEY_SEPARATOR).count(), 4);
    }

    #[test]
    fn test_within_section_order() {
        let items = vec![
            AllItem::from(fixtures::trip("t1", "Accra", 100.0, 4.0)),
            AllItem::from(fixtures::trip("t2", "Accra", 50.0, 4.0)),
            AllItem::from(fixtures::trip("t3", "Accra", 500.0, 4.8)),
            AllItem::from(crate::listing::Trip {
                id: "t4".to_string(),
                title: "No rating".to_string(),
                ..Default::default()
            }),
        ];
        let sections = group_items(&items, GroupMode::Category);
        assert_eq!(sections.len(), 1);
        let ids: Vec<&str> = sections[0].data.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["t3", "t2", "t1", "t4"]);
    }
}
