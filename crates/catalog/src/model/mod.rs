//! Catalog entities.
//!
//! Every entity is a [`Record`]: it has an id, a soft-delete flag and
//! timestamps, and is created and updated from a [`Draft`]. Entities with a
//! location are also [`PointOfInterest`]s and can be ranked by proximity.

mod beach;
mod dish;
mod heritage;
mod kinds;
mod location;
mod market;
mod restaurant;

pub use beach::{Beach, BeachDraft, BeachFilter};
pub use dish::{Dish, DishDraft, DishFilter};
pub use heritage::{HeritageDraft, HeritageFilter, HeritageSite};
pub use kinds::{AccessLevel, BeachType, LocalityType, PoiKind, PriceRange};
pub use location::{Locality, LocalityDraft, LocalityFilter, Zone, ZoneDraft, ZoneFilter};
pub use market::{LocalMarket, MarketDraft, MarketFilter};
pub use restaurant::{Restaurant, RestaurantDraft, RestaurantFilter};

use crate::filter::AttributeFilter;
use crate::store::CatalogStore;
use chrono::{DateTime, Utc};
use mallorca_core::validation::{ValidationResult, Validator};
use mallorca_core::Result;
use mallorca_geo::{Coordinate, Locatable};
use serde::{Deserialize, Serialize};

/// Create/update payload for a record.
pub trait Draft: Clone + Send + Sync {
    /// Checks field constraints.
    fn validate(&self) -> ValidationResult;
}

/// Record another record must point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// A zone id
    Zone(i64),
    /// A locality id
    Locality(i64),
}

/// A persisted catalog row.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable kind name used in messages.
    const KIND: &'static str;

    /// Payload accepted by create and update.
    type Draft: Draft;

    /// Attribute filter for listings and candidate fetches.
    type Filter: AttributeFilter<Self> + Default;

    /// Row id.
    fn id(&self) -> i64;

    /// False once soft-deleted.
    fn is_active(&self) -> bool;

    /// Sets the soft-delete flag.
    fn set_active(&mut self, active: bool, now: DateTime<Utc>);

    /// Builds a new row.
    fn from_draft(id: i64, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Replaces every editable field.
    fn apply_draft(&mut self, draft: Self::Draft, now: DateTime<Utc>);

    /// Row the draft must reference, if any.
    fn parent(_draft: &Self::Draft) -> Option<Parent> {
        None
    }

    /// Number of rows that still reference this one.
    fn dependents(_store: &CatalogStore, _id: i64) -> Result<usize> {
        Ok(0)
    }
}

/// A record with an optional location that can be ranked by proximity.
pub trait PointOfInterest: Record + Locatable {
    /// Kind tag for mixed listings.
    const POI_KIND: PoiKind;

    /// Display name.
    fn name(&self) -> &str;

    /// Compact form used when kinds are merged.
    fn summary(&self) -> PlaceSummary {
        let coordinate = self.coordinate();
        PlaceSummary {
            kind: Self::POI_KIND,
            id: self.id(),
            name: self.name().to_string(),
            latitude: coordinate.map(|c| c.latitude),
            longitude: coordinate.map(|c| c.longitude),
        }
    }
}

/// Kind-agnostic view of a point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    /// Entity kind
    pub kind: PoiKind,
    /// Id within the kind
    pub id: i64,
    /// Display name
    pub name: String,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
}

impl Locatable for PlaceSummary {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

/// Name rules shared by every entity.
pub(crate) fn check_name(validator: Validator, value: &str) -> Validator {
    validator
        .required("name", value)
        .min_length("name", value, 3)
        .max_length("name", value, 100)
}

/// Latitude and longitude are optional but must come as a valid pair.
///
/// Region membership is not required; stored points may sit just off the coast.
pub(crate) fn check_location(
    validator: Validator,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Validator {
    validator.custom("latitude", || match (latitude, longitude) {
        (None, None) => None,
        (Some(lat), Some(lon)) => match Coordinate::try_new(lat, lon) {
            Ok(coord) if coord.is_valid() => None,
            _ => Some(format!("({}, {}) is not a valid coordinate", lat, lon)),
        },
        _ => Some("latitude and longitude must be given together".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_location() {
        let ok = check_location(Validator::new(), Some(39.5), Some(2.8)).validate();
        assert!(ok.is_valid());

        let none = check_location(Validator::new(), None, None).validate();
        assert!(none.is_valid());

        let half = check_location(Validator::new(), Some(39.5), None).validate();
        assert!(!half.is_valid());

        let bad = check_location(Validator::new(), Some(95.0), Some(2.8)).validate();
        assert!(!bad.is_valid());

        let nan = check_location(Validator::new(), Some(f64::NAN), Some(2.8)).validate();
        assert!(!nan.is_valid());
    }

    #[test]
    fn test_summary_locatable() {
        let summary = PlaceSummary {
            kind: PoiKind::Market,
            id: 1,
            name: "Mercat de l'Olivar".to_string(),
            latitude: Some(39.5722),
            longitude: None,
        };
        assert!(summary.coordinate().is_none());
    }
}
