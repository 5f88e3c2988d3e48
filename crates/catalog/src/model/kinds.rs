//! Enumerated attributes.
//!
//! Each enum parses both its English name and the Spanish label used by the
//! original data sources (`arena`, `fácil`, `ciudad`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['á', 'à'], "a")
        .replace(['é', 'è'], "e")
        .replace(['í', 'ì'], "i")
        .replace(['ó', 'ò'], "o")
        .replace(['ú', 'ù'], "u")
}

/// Beach surface / shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeachType {
    /// Open sandy beach
    #[serde(alias = "arena")]
    Sand,
    /// Small cove ("cala")
    #[serde(alias = "cala")]
    Cove,
    /// Rocky shore
    #[serde(alias = "roca")]
    Rock,
    /// Pebble beach
    #[serde(alias = "piedras")]
    Pebble,
}

impl FromStr for BeachType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "sand" | "arena" => Ok(Self::Sand),
            "cove" | "cala" => Ok(Self::Cove),
            "rock" | "roca" | "rocas" => Ok(Self::Rock),
            "pebble" | "piedras" | "grava" => Ok(Self::Pebble),
            other => Err(format!("unknown beach type: {}", other)),
        }
    }
}

impl fmt::Display for BeachType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sand => "sand",
            Self::Cove => "cove",
            Self::Rock => "rock",
            Self::Pebble => "pebble",
        };
        f.write_str(label)
    }
}

/// How hard a beach is to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Car park or promenade next to the sand
    #[serde(alias = "fácil", alias = "facil")]
    Easy,
    /// Short walk
    #[serde(alias = "medio")]
    Moderate,
    /// Long hike or boat only
    #[serde(alias = "difícil", alias = "dificil")]
    Difficult,
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "easy" | "facil" => Ok(Self::Easy),
            "moderate" | "medio" | "medium" => Ok(Self::Moderate),
            "difficult" | "dificil" | "hard" => Ok(Self::Difficult),
            other => Err(format!("unknown access level: {}", other)),
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Difficult => "difficult",
        };
        f.write_str(label)
    }
}

/// Restaurant price band, stored as euro signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    /// €
    #[serde(rename = "€")]
    Budget,
    /// €€
    #[serde(rename = "€€")]
    Moderate,
    /// €€€
    #[serde(rename = "€€€")]
    Expensive,
    /// €€€€
    #[serde(rename = "€€€€")]
    Luxury,
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "€" | "1" | "budget" => Ok(Self::Budget),
            "€€" | "2" | "moderate" => Ok(Self::Moderate),
            "€€€" | "3" | "expensive" => Ok(Self::Expensive),
            "€€€€" | "4" | "luxury" => Ok(Self::Luxury),
            other => Err(format!("unknown price range: {}", other)),
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Budget => "€",
            Self::Moderate => "€€",
            Self::Expensive => "€€€",
            Self::Luxury => "€€€€",
        };
        f.write_str(label)
    }
}

/// Size class of a locality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalityType {
    /// "ciudad"
    #[serde(alias = "ciudad")]
    City,
    /// "pueblo"
    #[serde(alias = "pueblo")]
    Town,
}

impl FromStr for LocalityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "city" | "ciudad" => Ok(Self::City),
            "town" | "pueblo" | "village" => Ok(Self::Town),
            other => Err(format!("unknown locality type: {}", other)),
        }
    }
}

impl fmt::Display for LocalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::City => "city",
            Self::Town => "town",
        })
    }
}

/// Point of interest kinds that support proximity queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiKind {
    /// [`crate::Beach`]
    Beach,
    /// [`crate::Restaurant`]
    Restaurant,
    /// [`crate::HeritageSite`]
    Heritage,
    /// [`crate::LocalMarket`]
    Market,
    /// [`crate::Dish`]
    Dish,
}

impl PoiKind {
    /// Every kind, in the order mixed listings merge them.
    pub const ALL: [PoiKind; 5] = [
        PoiKind::Beach,
        PoiKind::Restaurant,
        PoiKind::Heritage,
        PoiKind::Market,
        PoiKind::Dish,
    ];
}

impl FromStr for PoiKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "beach" | "beaches" | "playa" | "playas" => Ok(Self::Beach),
            "restaurant" | "restaurants" => Ok(Self::Restaurant),
            "heritage" | "monument" | "monuments" => Ok(Self::Heritage),
            "market" | "markets" => Ok(Self::Market),
            "dish" | "dishes" | "food" => Ok(Self::Dish),
            other => Err(format!("unknown kind: {}", other)),
        }
    }
}

impl fmt::Display for PoiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Beach => "beach",
            Self::Restaurant => "restaurant",
            Self::Heritage => "heritage",
            Self::Market => "market",
            Self::Dish => "dish",
        })
    }
}
