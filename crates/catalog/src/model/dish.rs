use super::{check_location, check_name, Draft, PoiKind, PointOfInterest, Record};
use crate::filter::{eq_ignore_case, AttributeFilter, FilterContext};
use chrono::{DateTime, Utc};
use mallorca_core::validation::{ValidationResult, Validator};
use mallorca_geo::{Coordinate, Locatable};
use serde::{Deserialize, Serialize};

/// Typical Mallorcan dish. The optional location points at a place to try it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub image: String,
    pub preparation: Option<String>,
    pub where_to_try: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub image: String,
    #[serde(default)]
    pub preparation: Option<String>,
    #[serde(default)]
    pub where_to_try: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Draft for DishDraft {
    fn validate(&self) -> ValidationResult {
        let validator = check_name(Validator::new(), &self.name)
            .required("category", &self.category)
            .min_length("description", &self.description, 10)
            .custom("ingredients", || {
                self.ingredients
                    .iter()
                    .any(|s| s.contains(','))
                    .then(|| "ingredient names cannot contain commas".to_string())
            })
            .warn_if("ingredients", self.ingredients.is_empty(), "No ingredients listed");
        check_location(validator, self.latitude, self.longitude).validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DishFilter {
    pub category: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl AttributeFilter<Dish> for DishFilter {
    fn matches(&self, item: &Dish, _ctx: &FilterContext) -> bool {
        eq_ignore_case(self.category.as_deref(), &item.category)
    }

    fn include_inactive(&self) -> bool {
        self.include_inactive
    }
}

impl Locatable for Dish {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

impl Record for Dish {
    const KIND: &'static str = "Dish";
    type Draft = DishDraft;
    type Filter = DishFilter;

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

    fn from_draft(id: i64, draft: DishDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            description: draft.description,
            ingredients: draft.ingredients,
            image: draft.image,
            preparation: draft.preparation,
            where_to_try: draft.where_to_try,
            latitude: draft.latitude,
            longitude: draft.longitude,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_draft(&mut self, draft: DishDraft, now: DateTime<Utc>) {
        let (id, created_at, is_active) = (self.id, self.created_at, self.is_active);
        *self = Self::from_draft(id, draft, now);
        self.created_at = created_at;
        self.is_active = is_active;
    }
}

impl PointOfInterest for Dish {
    const POI_KIND: PoiKind = PoiKind::Dish;

    fn name(&self) -> &str {
        &self.name
    }
}
