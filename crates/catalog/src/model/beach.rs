use super::{
    check_location, check_name, AccessLevel, BeachType, Draft, Parent, PoiKind, PointOfInterest,
    Record,
};
use crate::filter::{contains_ignore_case, eq_opt, AttributeFilter, FilterContext};
use chrono::{DateTime, Utc};
use mallorca_core::validation::{ValidationResult, Validator};
use mallorca_geo::{Coordinate, Locatable};
use serde::{Deserialize, Serialize};

/// A beach or cove, attached to a locality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beach {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub beach_type: BeachType,
    pub access: AccessLevel,
    pub services: Vec<String>,
    pub featured: bool,
    pub locality_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeachDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub beach_type: BeachType,
    pub access: AccessLevel,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub locality_id: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Draft for BeachDraft {
    fn validate(&self) -> ValidationResult {
        let validator = check_name(Validator::new(), &self.name)
            .min_length("description", &self.description, 10)
            .custom("services", || {
                self.services
                    .iter()
                    .any(|s| s.contains(','))
                    .then(|| "service names cannot contain commas".to_string())
            });
        check_location(validator, self.latitude, self.longitude).validate()
    }
}

/// Beach listing filter.
///
/// `zone_id` is resolved through the beach's locality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeachFilter {
    pub zone_id: Option<i64>,
    pub locality_id: Option<i64>,
    pub beach_type: Option<BeachType>,
    pub featured: Option<bool>,
    pub name: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl AttributeFilter<Beach> for BeachFilter {
    fn matches(&self, item: &Beach, ctx: &FilterContext) -> bool {
        let zone_ok = match self.zone_id {
            Some(zone) => ctx.zone_of(item.locality_id) == Some(zone),
            None => true,
        };
        zone_ok
            && eq_opt(self.locality_id, item.locality_id)
            && eq_opt(self.beach_type, item.beach_type)
            && eq_opt(self.featured, item.featured)
            && contains_ignore_case(self.name.as_deref(), &item.name)
    }

    fn include_inactive(&self) -> bool {
        self.include_inactive
    }
}

impl Locatable for Beach {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

impl Record for Beach {
    const KIND: &'static str = "Beach";
    type Draft = BeachDraft;
    type Filter = BeachFilter;

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

    fn from_draft(id: i64, draft: BeachDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            image: draft.image,
            beach_type: draft.beach_type,
            access: draft.access,
            services: draft.services,
            featured: draft.featured,
            locality_id: draft.locality_id,
            latitude: draft.latitude,
            longitude: draft.longitude,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_draft(&mut self, draft: BeachDraft, now: DateTime<Utc>) {
        let id = self.id;
        let created_at = self.created_at;
        let is_active = self.is_active;
        *self = Self::from_draft(id, draft, now);
        self.created_at = created_at;
        self.is_active = is_active;
    }

    fn parent(draft: &BeachDraft) -> Option<Parent> {
        Some(Parent::Locality(draft.locality_id))
    }
}

impl PointOfInterest for Beach {
    const POI_KIND: PoiKind = PoiKind::Beach;

    fn name(&self) -> &str {
        &self.name
    }
}
