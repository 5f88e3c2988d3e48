use super::{check_location, check_name, Draft, PoiKind, PointOfInterest, Record};
use crate::filter::{contains_ignore_case, AttributeFilter, FilterContext};
use chrono::{DateTime, Utc};
use mallorca_core::validation::{ValidationResult, Validator};
use mallorca_geo::{Coordinate, Locatable};
use serde::{Deserialize, Serialize};

/// Monument, castle, cathedral or similar site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageSite {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Historical period, e.g. "Gótico"
    pub period: String,
    pub highlight: String,
    pub schedule: String,
    pub open_days: String,
    pub image: String,
    pub address: String,
    pub google_maps_url: String,
    pub entrance_fee: Option<String>,
    pub accessibility: Option<String>,
    pub guided_tours: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageDraft {
    pub name: String,
    pub description: String,
    pub period: String,
    pub highlight: String,
    pub schedule: String,
    pub open_days: String,
    pub image: String,
    pub address: String,
    pub google_maps_url: String,
    #[serde(default)]
    pub entrance_fee: Option<String>,
    #[serde(default)]
    pub accessibility: Option<String>,
    #[serde(default)]
    pub guided_tours: Option<bool>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Draft for HeritageDraft {
    fn validate(&self) -> ValidationResult {
        let validator = check_name(Validator::new(), &self.name)
            .min_length("description", &self.description, 10)
            .required("period", &self.period)
            .required("address", &self.address)
            .url("google_maps_url", &self.google_maps_url);
        check_location(validator, self.latitude, self.longitude).validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeritageFilter {
    pub period: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl AttributeFilter<HeritageSite> for HeritageFilter {
    fn matches(&self, item: &HeritageSite, _ctx: &FilterContext) -> bool {
        contains_ignore_case(self.period.as_deref(), &item.period)
    }

    fn include_inactive(&self) -> bool {
        self.include_inactive
    }
}

impl Locatable for HeritageSite {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

impl Record for HeritageSite {
    const KIND: &'static str = "Heritage site";
    type Draft = HeritageDraft;
    type Filter = HeritageFilter;

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

    fn from_draft(id: i64, draft: HeritageDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            period: draft.period,
            highlight: draft.highlight,
            schedule: draft.schedule,
            open_days: draft.open_days,
            image: draft.image,
            address: draft.address,
            google_maps_url: draft.google_maps_url,
            entrance_fee: draft.entrance_fee,
            accessibility: draft.accessibility,
            guided_tours: draft.guided_tours,
            latitude: draft.latitude,
            longitude: draft.longitude,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_draft(&mut self, draft: HeritageDraft, now: DateTime<Utc>) {
        let (id, created_at, is_active) = (self.id, self.created_at, self.is_active);
        *self = Self::from_draft(id, draft, now);
        self.created_at = created_at;
        self.is_active = is_active;
    }
}

impl PointOfInterest for HeritageSite {
    const POI_KIND: PoiKind = PoiKind::Heritage;

    fn name(&self) -> &str {
        &self.name
    }
}
