use serde::{Deserialize, Serialize};
use std::fmt;

/// Property category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Villa,
    Appartement,
    Studio,
    Penthouse,
    Terrain,
    Bureau,
    Commercial,
    MaisonDHotes,
    /// Fallback when no rule matches.
    Autre,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Villa => "Villa",
            Category::Appartement => "Appartement",
            Category::Studio => "Studio",
            Category::Penthouse => "Penthouse",
            Category::Terrain => "Terrain",
            Category::Bureau => "Bureau",
            Category::Commercial => "Commercial",
            Category::MaisonDHotes => "Maison d'hôtes",
            Category::Autre => "Autre",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a property is for sale, for rent, or a short stay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Sale,
    Rent,
    Short,
}

impl Disposition {
    /// Stable identifier used in section keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Sale => "sale",
            Disposition::Rent => "rent",
            Disposition::Short => "short",
        }
    }

    /// Display label used in section titles.
    pub fn label(&self) -> &'static str {
        match self {
            Disposition::Sale => "À vendre",
            Disposition::Rent => "À louer",
            Disposition::Short => "Courte durée",
        }
    }
}

/// Normalized professional specialty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProCategory {
    Agency,
    Agent,
    Manager,
    HotelBooking,
    ResidenceBooking,
    EventSpace,
    /// Fallback when no rule matches.
    Generic,
}

impl ProCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ProCategory::Agency => "Agences immobilières",
            ProCategory::Agent => "Agents immobiliers",
            ProCategory::Manager => "Gestionnaires de biens",
            ProCategory::HotelBooking => "Réservation d'hôtels",
            ProCategory::ResidenceBooking => "Réservation de résidences",
            ProCategory::EventSpace => "Espaces événementiels",
            ProCategory::Generic => "Professionnel",
        }
    }
}

impl fmt::Display for ProCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
