use super::{check_location, check_name, Draft, PoiKind, PointOfInterest, Record};
use crate::filter::{contains_ignore_case, AttributeFilter, FilterContext};
use chrono::{DateTime, Utc};
use mallorca_core::validation::{ValidationResult, Validator};
use mallorca_geo::{Coordinate, Locatable};
use serde::{Deserialize, Serialize};

/// Weekly street market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalMarket {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub address: String,
    pub google_maps_url: String,
    /// Market days, e.g. "Martes"
    pub days: String,
    pub hours: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDraft {
    pub name: String,
    pub location: String,
    pub address: String,
    pub google_maps_url: String,
    pub days: String,
    pub hours: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Draft for MarketDraft {
    fn validate(&self) -> ValidationResult {
        let validator = check_name(Validator::new(), &self.name)
            .required("location", &self.location)
            .required("address", &self.address)
            .required("days", &self.days)
            .required("hours", &self.hours)
            .url("google_maps_url", &self.google_maps_url);
        check_location(validator, self.latitude, self.longitude).validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketFilter {
    pub location: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl AttributeFilter<LocalMarket> for MarketFilter {
    fn matches(&self, item: &LocalMarket, _ctx: &FilterContext) -> bool {
        contains_ignore_case(self.location.as_deref(), &item.location)
    }

    fn include_inactive(&self) -> bool {
        self.include_inactive
    }
}

impl Locatable for LocalMarket {
    fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

impl Record for LocalMarket {
    const KIND: &'static str = "Market";
    type Draft = MarketDraft;
    type Filter = MarketFilter;

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

    fn from_draft(id: i64, draft: MarketDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            location: draft.location,
            address: draft.address,
            google_maps_url: draft.google_maps_url,
            days: draft.days,
            hours: draft.hours,
            description: draft.description,
            image: draft.image,
            latitude: draft.latitude,
            longitude: draft.longitude,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_draft(&mut self, draft: MarketDraft, now: DateTime<Utc>) {
        let (id, created_at, is_active) = (self.id, self.created_at, self.is_active);
        *self = Self::from_draft(id, draft, now);
        self.created_at = created_at;
        self.is_active = is_active;
    }
}

impl PointOfInterest for LocalMarket {
    const POI_KIND: PoiKind = PoiKind::Market;

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_without_coordinates_is_not_locatable() {
        let draft = MarketDraft {
            name: "Mercado de Sineu".to_string(),
            location: "Sineu".to_string(),
            address: "Plaça des Fossar".to_string(),
            google_maps_url: "https://maps.google.com/?q=Sineu".to_string(),
            days: "Miércoles".to_string(),
            hours: "08:00-13:30".to_string(),
            description: None,
            image: None,
            latitude: None,
            longitude: None,
        };
        assert!(draft.validate().is_valid());

        let market = LocalMarket::from_draft(1, draft, Utc::now());
        assert!(market.coordinate().is_none());
        assert!(MarketFilter {
            location: Some("SINEU".to_string()),
            include_inactive: false,
        }
        .matches(&market, &FilterContext::default()));
    }
}
