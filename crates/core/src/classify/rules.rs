//! Ordered keyword rules. Patterns run against folded text (lowercase,
//! accents stripped), so they are written in plain ASCII.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::{Category, Disposition, ProCategory};
use crate::listing::Property;
use crate::text::fold;

/// An ordered list of `(pattern, label)` rules.
struct RuleSet<L: Copy> {
    rules: Vec<(Regex, L)>,
}

impl<L: Copy> RuleSet<L> {
    fn new(rules: &[(&str, L)]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|(pattern, label)| {
                    (
                        Regex::new(pattern).expect("classifier pattern must compile"),
                        *label,
                    )
                })
                .collect(),
        }
    }

    /// Label of the first rule matching any of the fields.
    fn classify(&self, fields: &[Option<&str>]) -> Option<L> {
        let folded: Vec<String> = fields.iter().flatten().map(|f| fold(f)).collect();
        if folded.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|(re, _)| folded.iter().any(|text| re.is_match(text)))
            .map(|(_, label)| *label)
    }
}

static CATEGORY_RULES: Lazy<RuleSet<Category>> = Lazy::new(|| {
    RuleSet::new(&[
        (r"\bvillas?\b", Category::Villa),
        (r"\b(appartements?|apartments?|appart|flats?)\b", Category::Appartement),
        (r"\bstudios?\b", Category::Studio),
        (r"\bpenthouses?\b", Category::Penthouse),
        (r"\b(terrains?|lands?|parcelles?)\b", Category::Terrain),
        (r"\b(bureaux?|offices?)\b", Category::Bureau),
        (
            r"\b(commerces?|commercial|shops?|retail|boutiques?|magasins?)\b",
            Category::Commercial,
        ),
        (
            r"(maisons? d.?hotes?|guest[\s-]?houses?)",
            Category::MaisonDHotes,
        ),
    ])
});

// Short stay runs first: "location courte durée" also contains "location".
static DISPOSITION_RULES: Lazy<RuleSet<Disposition>> = Lazy::new(|| {
    RuleSet::new(&[
        (
            r"\b(courte?s?|short|nuits?|nuitees?|nights?|nightly|jours?|journalier|days?|daily|saisonniers?|seasonal|holidays?|vacances|sejours?)\b",
            Disposition::Short,
        ),
        (
            r"\b(ventes?|vendre|vendu|sale|sell|selling|achat|buy)\b",
            Disposition::Sale,
        ),
        (
            r"\b(locations?|louer|loyer|rent|rental|renting|lease|bail|mensuel|monthly|mois|month)\b",
            Disposition::Rent,
        ),
    ])
});

static PRO_RULES: Lazy<RuleSet<ProCategory>> = Lazy::new(|| {
    RuleSet::new(&[
        (r"\b(agences?|agency|agencies)\b", ProCategory::Agency),
        (
            r"\b(agents?|courtiers?|brokers?|realtors?|negociateurs?)\b",
            ProCategory::Agent,
        ),
        (
            r"\b(gestion|gestionnaires?|managers?|management|syndic)\b",
            ProCategory::Manager,
        ),
        (
            r"\b(hotels?|hotelier|hoteliere|hotellerie)\b",
            ProCategory::HotelBooking,
        ),
        (
            r"\b(residences?|meubles?|furnished|apart[\s-]?hotels?)\b",
            ProCategory::ResidenceBooking,
        ),
        (
            r"\b(evenementiels?|evenements?|events?|salles?|venues?|receptions?)\b",
            ProCategory::EventSpace,
        ),
    ])
});

/// Category of a property from its free-text `type` and `category` fields.
pub fn category(property: &Property) -> Category {
    classify_category(&[property.property_type.as_deref(), property.category.as_deref()])
}

/// Category from arbitrary free-text fields; `Autre` when nothing matches.
pub fn classify_category(fields: &[Option<&str>]) -> Category {
    CATEGORY_RULES.classify(fields).unwrap_or(Category::Autre)
}

/// Disposition of a property from `status`, `disposition`, `market` and
/// `price_unit`. `None` when nothing matches; absence is valid.
pub fn disposition(property: &Property) -> Option<Disposition> {
    classify_disposition(&[
        property.status.as_deref(),
        property.disposition.as_deref(),
        property.market.as_deref(),
        property.price_unit.as_deref(),
    ])
}

/// Disposition from arbitrary free-text fields.
pub fn classify_disposition(fields: &[Option<&str>]) -> Option<Disposition> {
    DISPOSITION_RULES.classify(fields)
}

/// Normalize a professional's free-text specialty.
pub fn professional_category(specialty: Option<&str>) -> ProCategory {
    PRO_RULES.classify(&[specialty]).unwrap_or(ProCategory::Generic)
}
