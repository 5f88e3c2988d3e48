use super::{check_location, check_name, Draft, PoiKind, PointOfInterest, PriceRange, Record};
use crate::filter::{contains_ignore_case, eq_ignore_case, eq_opt, AttributeFilter, FilterContext};
use chrono::{DateTime, Utc};
use mallorca_core::validation::{ValidationResult, Validator};
use mallorca_geo::{Coordinate, Locatable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    /// Town or neighbourhood, free text
    pub location: String,
    pub specialty: String,
    pub price: PriceRange,
    pub reservation_required: bool,
    pub url: Option<String>,
    pub cuisine_type: String,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDraft {
    pub name: String,
    pub location: String,
    pub specialty: String,
    pub price: PriceRange,
    #[serde(default)]
    pub reservation_required: bool,
    #[serde(default)]
    pub url: Option<String>,
    pub cuisine_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Draft for RestaurantDraft {
    fn validate(&self) -> ValidationResult {
        let mut validator = check_name(Validator::new(), &self.name)
            .required("location", &self.location)
            .required("cuisine_type", &self.cuisine_type)
            .optional_url("url", self.url.as_deref());
        if let Some(phone) = &self.phone {
            validator = validator
                .pattern(
                    "phone",
                    phone,
                    r"^\+?[0-9 ]{6,20}$",
                    "digits and spaces, optional leading +",
                )
                .max_length("phone", phone, 20);
        }
        check_location(validator, self.latitude, self.longitude).validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestaurantFilter {
    /// Substring of `location`
    pub location: Option<String>,
    pub cuisine_type: Option<String>,
    pub price: Option<PriceRange>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl AttributeFilter<Restaurant> for RestaurantFilter {
    fn matches(&self, item: &Restaurant, _ctx: &FilterContext) -> bool {
        contains_ignore_case(self.location.as_deref(), &item.location)
            && eq_ignore_case(self.cuisine_type.as_deref(), &item.cuisine_type)
            && eq_opt(self.price, item.price)
    }

    fn include_inactive(&self) -> bool {
        self.include_inactive
    }
}

impl Locatable for Restaurant {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

impl Record for Restaurant {
    const KIND: &'static str = "Restaurant";
    type Draft = RestaurantDraft;
    type Filter = RestaurantFilter;

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

    fn from_draft(id: i64, draft: RestaurantDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            location: draft.location,
            specialty: draft.specialty,
            price: draft.price,
            reservation_required: draft.reservation_required,
            url: draft.url,
            cuisine_type: draft.cuisine_type,
            description: draft.description,
            schedule: draft.schedule,
            phone: draft.phone,
            image: draft.image,
            latitude: draft.latitude,
            longitude: draft.longitude,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_draft(&mut self, draft: RestaurantDraft, now: DateTime<Utc>) {
        let (id, created_at, is_active) = (self.id, self.created_at, self.is_active);
        *self = Self::from_draft(id, draft, now);
        self.created_at = created_at;
        self.is_active = is_active;
    }
}

impl PointOfInterest for Restaurant {
    const POI_KIND: PoiKind = PoiKind::Restaurant;

    fn name(&self) -> &str {
        &self.name
    }
}
