//! Zones and localities.
//!
//! Localities belong to exactly one zone. Beaches reference a locality, which
//! is how zone filters reach them.

use super::{check_location, check_name, Draft, LocalityType, Parent, Record};
use crate::filter::{eq_opt, AttributeFilter, FilterContext};
use crate::store::CatalogStore;
use chrono::{DateTime, Utc};
use mallorca_core::validation::{ValidationResult, Validator};
use mallorca_core::Result;
use mallorca_geo::{Coordinate, Locatable};
use serde::{Deserialize, Serialize};

/// Coarse region of the island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDraft {
    pub name: String,
}

impl ZoneDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Draft for ZoneDraft {
    fn validate(&self) -> ValidationResult {
        check_name(Validator::new(), &self.name).validate()
    }
}

/// Zones have no attributes to filter on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneFilter {
    #[serde(default)]
    pub include_inactive: bool,
}

impl AttributeFilter<Zone> for ZoneFilter {
    fn matches(&self, _item: &Zone, _ctx: &FilterContext) -> bool {
        true
    }

    fn include_inactive(&self) -> bool {
        self.include_inactive
    }
}

impl Record for Zone {
    const KIND: &'static str = "Zone";
    type Draft = ZoneDraft;
    type Filter = ZoneFilter;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool, now: DateTime<Utc>) {
        self.is_active = active;
        self.updated_at = now;
    }

    fn from_draft(id: i64, draft: ZoneDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_draft(&mut self, draft: ZoneDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.updated_at = now;
    }

    fn dependents(store: &CatalogStore, id: i64) -> Result<usize> {
        let filter = LocalityFilter {
            zone_id: Some(id),
            include_inactive: true,
        };
        Ok(store.count::<Locality>(&filter))
    }
}

/// A city or town.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    pub id: i64,
    pub name: String,
    pub locality_type: LocalityType,
    pub zone_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalityDraft {
    pub name: String,
    pub locality_type: LocalityType,
    pub zone_id: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LocalityDraft {
    pub fn new(name: impl Into<String>, locality_type: LocalityType, zone_id: i64) -> Self {
        Self {
            name: name.into(),
            locality_type,
            zone_id,
            latitude: None,
            longitude: None,
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

impl Draft for LocalityDraft {
    fn validate(&self) -> ValidationResult {
        let validator = check_name(Validator::new(), &self.name);
        check_location(validator, self.latitude, self.longitude).validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalityFilter {
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl AttributeFilter<Locality> for LocalityFilter {
    fn matches(&self, item: &Locality, _ctx: &FilterContext) -> bool {
        eq_opt(self.zone_id, item.zone_id)
    }

    fn include_inactive(&self) -> bool {
        self.include_inactive
    }
}

impl Locatable for Locality {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

impl Record for Locality {
    const KIND: &'static str = "Locality";
    type Draft = LocalityDraft;
    type Filter = LocalityFilter;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool, now: DateTime<Utc>) {
        self.is_active = active;
        self.updated_at = now;
    }

    fn from_draft(id: i64, draft: LocalityDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            locality_type: draft.locality_type,
            zone_id: draft.zone_id,
            latitude: draft.latitude,
            longitude: draft.longitude,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_draft(&mut self, draft: LocalityDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.locality_type = draft.locality_type;
        self.zone_id = draft.zone_id;
        self.latitude = draft.latitude;
        self.longitude = draft.longitude;
        self.updated_at = now;
    }

    fn parent(draft: &LocalityDraft) -> Option<Parent> {
        Some(Parent::Zone(draft.zone_id))
    }

    fn dependents(store: &CatalogStore, id: i64) -> Result<usize> {
        let filter = super::BeachFilter {
            locality_id: Some(id),
            include_inactive: true,
            ..Default::default()
        };
        Ok(store.count::<super::Beach>(&filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_draft_validation() {
        assert!(ZoneDraft::new("Levante").validate().is_valid());
        assert!(!ZoneDraft::new("Le").validate().is_valid());
        assert!(!ZoneDraft::new("").validate().is_valid());
    }

    #[test]
    fn test_locality_draft_validation() {
        let draft = LocalityDraft::new("Deià", LocalityType::Town, 2).at(39.7486, 2.6483);
        assert!(draft.validate().is_valid());

        let mut half = LocalityDraft::new("Deià", LocalityType::Town, 2);
        half.longitude = Some(2.6483);
        assert!(!half.validate().is_valid());
    }

    #[test]
    fn test_locality_filter_by_zone() {
        let now = Utc::now();
        let draft = LocalityDraft::new("Sóller", LocalityType::Town, 2);
        let locality = Locality::from_draft(1, draft, now);
        let ctx = FilterContext::default();

        assert!(LocalityFilter::default().matches(&locality, &ctx));
        let filter = LocalityFilter {
            zone_id: Some(2),
            ..Default::default()
        };
        assert!(filter.matches(&locality, &ctx));
        let other = LocalityFilter {
            zone_id: Some(3),
            ..Default::default()
        };
        assert!(!other.matches(&locality, &ctx));
    }

    #[test]
    fn test_locality_parent_is_zone() {
        let draft = LocalityDraft::new("Artà", LocalityType::Town, 3);
        assert_eq!(Locality::parent(&draft), Some(Parent::Zone(3)));
        assert_eq!(Zone::parent(&ZoneDraft::new("Levante")), None);
    }
}
