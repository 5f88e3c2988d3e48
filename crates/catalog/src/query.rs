//! Query orchestration.
//!
//! The orchestrator sits between callers and a [`CandidateSource`]. It gates
//! the caller's reference point on [`MALLORCA_BOUNDS`], applies attribute
//! filters through the source, and hands the survivors to the proximity filter.

use crate::filter::Page;
use crate::model::{
    Beach, Dish, HeritageSite, LocalMarket, PlaceSummary, PoiKind, PointOfInterest, Record,
    Restaurant,
};
use crate::store::{CatalogStore, TableOf};
use mallorca_core::config::NearbyConfig;
use mallorca_core::{Error, Result};
use mallorca_geo::{
    count_within_radius, find_nearby_owned, Coordinate, ProximityQuery, RankedResult,
    MALLORCA_BOUNDS,
};
use serde::Serialize;
use tracing::debug;

/// Supplies attribute-filtered candidates of one kind.
pub trait CandidateSource<T: Record> {
    /// Rows passing `filter`, in a stable order.
    fn fetch_candidates(&self, filter: &T::Filter) -> Result<Vec<T>>;
}

impl<T: Record> CandidateSource<T> for CatalogStore
where
    CatalogStore: TableOf<T>,
{
    fn fetch_candidates(&self, filter: &T::Filter) -> Result<Vec<T>> {
        Ok(self.matching(filter))
    }
}

/// Radius and result cap used when a nearby call leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyDefaults {
    pub radius_km: f64,
    pub max_results: usize,
}

impl Default for NearbyDefaults {
    fn default() -> Self {
        Self {
            radius_km: 5.0,
            max_results: 10,
        }
    }
}

impl From<&NearbyConfig> for NearbyDefaults {
    fn from(config: &NearbyConfig) -> Self {
        Self {
            radius_km: config.default_radius_km,
            max_results: config.default_max_results,
        }
    }
}

/// Options for [`QueryOrchestrator::list_with_optional_distance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListOptions {
    /// When set, results carry a distance and are limited to the radius.
    pub reference: Option<Coordinate>,
    pub radius_km: Option<f64>,
    pub skip: usize,
    pub limit: usize,
    pub order_by_distance: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            reference: None,
            radius_km: None,
            skip: 0,
            limit: Page::default().limit,
            order_by_distance: false,
        }
    }
}

/// A listed entity, with its distance when a reference point was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Ranked places around a reference, with the count before the result cap.
#[derive(Debug, Clone, Serialize)]
pub struct PlacesNearby {
    pub reference: Coordinate,
    pub radius_km: f64,
    pub total_within_radius: usize,
    pub results: Vec<RankedResult<PlaceSummary>>,
}

/// Combines attribute filtering with proximity ranking.
#[derive(Debug, Clone, Copy)]
pub struct QueryOrchestrator<'s, S> {
    source: &'s S,
    defaults: NearbyDefaults,
}

impl<'s, S> QueryOrchestrator<'s, S> {
    pub fn new(source: &'s S, defaults: NearbyDefaults) -> Self {
        Self { source, defaults }
    }

    pub fn defaults(&self) -> NearbyDefaults {
        self.defaults
    }

    /// Attribute-filtered listing, optionally ranked against a reference point.
    ///
    /// Without a reference this is a plain paginated listing and candidates
    /// without coordinates are included. With one, the reference must lie in
    /// the region and only located candidates within the radius are returned.
    pub fn list_with_optional_distance<T>(
        &self,
        filter: &T::Filter,
        options: &ListOptions,
    ) -> Result<Vec<Listing<T>>>
    where
        T: PointOfInterest,
        S: CandidateSource<T>,
    {
        let Some(reference) = options.reference else {
            let candidates = self.source.fetch_candidates(filter)?;
            let page = Page::new(options.skip, options.limit);
            return Ok(page
                .apply(candidates)
                .into_iter()
                .map(|item| Listing { item, distance_km: None })
                .collect());
        };

        check_reference(&reference)?;
        check_radius(options.radius_km)?;

        let candidates = self.source.fetch_candidates(filter)?;
        let query = ProximityQuery::new(reference)
            .with_optional_radius(options.radius_km)
            .with_offset(options.skip)
            .with_max_results(options.limit)
            .ordered_by_distance(options.order_by_distance);

        debug!(
            kind = T::KIND,
            candidates = candidates.len(),
            radius_km = ?options.radius_km,
            "Ranking listing"
        );

        Ok(find_nearby_owned(&query, candidates)
            .into_iter()
            .map(|r| Listing {
                item: r.candidate,
                distance_km: Some(r.distance_km),
            })
            .collect())
    }

    /// Active entities of one kind near `reference`, closest first.
    pub fn nearby<T>(
        &self,
        reference: Coordinate,
        radius_km: Option<f64>,
        max_results: Option<usize>,
    ) -> Result<Vec<RankedResult<T>>>
    where
        T: PointOfInterest,
        S: CandidateSource<T>,
    {
        let query = self.nearby_query(reference, radius_km, max_results)?;
        // Default filter: every attribute open, soft-deleted rows excluded.
        let candidates = self.source.fetch_candidates(&T::Filter::default())?;

        debug!(kind = T::KIND, candidates = candidates.len(), "Nearby query");
        Ok(find_nearby_owned(&query, candidates))
    }

    /// Active entities of the given kinds near `reference`, merged into one
    /// distance-ordered list.
    ///
    /// Ties keep the order of `kinds`.
    pub fn nearby_places(
        &self,
        reference: Coordinate,
        kinds: &[PoiKind],
        radius_km: Option<f64>,
        max_results: Option<usize>,
    ) -> Result<Vec<RankedResult<PlaceSummary>>>
    where
        S: CandidateSource<Beach>
            + CandidateSource<Restaurant>
            + CandidateSource<HeritageSite>
            + CandidateSource<LocalMarket>
            + CandidateSource<Dish>,
    {
        Ok(self.places_nearby(reference, kinds, radius_km, max_results)?.results)
    }

    /// [`nearby_places`](Self::nearby_places) plus the effective radius and
    /// how many places fall within it before `max_results` applies.
    pub fn places_nearby(
        &self,
        reference: Coordinate,
        kinds: &[PoiKind],
        radius_km: Option<f64>,
        max_results: Option<usize>,
    ) -> Result<PlacesNearby>
    where
        S: CandidateSource<Beach>
            + CandidateSource<Restaurant>
            + CandidateSource<HeritageSite>
            + CandidateSource<LocalMarket>
            + CandidateSource<Dish>,
    {
        let query = self.nearby_query(reference, radius_km, max_results)?;
        let radius_km = radius_km.unwrap_or(self.defaults.radius_km);

        let mut places = Vec::new();
        for kind in kinds {
            match kind {
                PoiKind::Beach => places.extend(self.summaries::<Beach>()?),
                PoiKind::Restaurant => places.extend(self.summaries::<Restaurant>()?),
                PoiKind::Heritage => places.extend(self.summaries::<HeritageSite>()?),
                PoiKind::Market => places.extend(self.summaries::<LocalMarket>()?),
                PoiKind::Dish => places.extend(self.summaries::<Dish>()?),
            }
        }

        let total_within_radius = count_within_radius(&reference, &places, radius_km);
        debug!(
            kinds = kinds.len(),
            candidates = places.len(),
            total_within_radius,
            "Nearby places query"
        );

        Ok(PlacesNearby {
            reference,
            radius_km,
            total_within_radius,
            results: find_nearby_owned(&query, places),
        })
    }

    /// [`nearby_places`](Self::nearby_places) over every kind.
    pub fn nearby_any(
        &self,
        reference: Coordinate,
        radius_km: Option<f64>,
        max_results: Option<usize>,
    ) -> Result<Vec<RankedResult<PlaceSummary>>>
    where
        S: CandidateSource<Beach>
            + CandidateSource<Restaurant>
            + CandidateSource<HeritageSite>
            + CandidateSource<LocalMarket>
            + CandidateSource<Dish>,
    {
        self.nearby_places(reference, &PoiKind::ALL, radius_km, max_results)
    }

    fn nearby_query(
        &self,
        reference: Coordinate,
        radius_km: Option<f64>,
        max_results: Option<usize>,
    ) -> Result<ProximityQuery> {
        check_reference(&reference)?;
        check_radius(radius_km)?;

        Ok(ProximityQuery::new(reference)
            .with_radius(radius_km.unwrap_or(self.defaults.radius_km))
            .with_max_results(max_results.unwrap_or(self.defaults.max_results))
            .ordered_by_distance(true))
    }

    fn summaries<T>(&self) -> Result<Vec<PlaceSummary>>
    where
        T: PointOfInterest,
        S: CandidateSource<T>,
    {
        let candidates = self.source.fetch_candidates(&T::Filter::default())?;
        Ok(candidates.iter().map(|c| c.summary()).collect())
    }
}

fn check_reference(reference: &Coordinate) -> Result<()> {
    MALLORCA_BOUNDS.check(reference)?;
    Ok(())
}

fn check_radius(radius_km: Option<f64>) -> Result<()> {
    match radius_km {
        Some(radius) if !radius.is_finite() || radius < 0.0 => Err(Error::invalid_input(format!(
            "Radius must be a non-negative number of kilometres, got {}",
            radius
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BeachFilter, BeachType, RestaurantFilter};
    use crate::seed;
    use mallorca_core::ErrorCode;

    const ALCUDIA: Coordinate = Coordinate::new(39.8353, 3.1190);

    fn store() -> CatalogStore {
        seed::mallorca().unwrap()
    }

    #[test]
    fn test_nearby_beaches_from_alcudia() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let results = orchestrator.nearby::<Beach>(ALCUDIA, Some(50.0), None).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.candidate.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Playa de Alcúdia",
                "Cala Mesquida",
                "Cala Varques",
                "Cala Deià",
                "Playa de Palma",
            ]
        );
        let distances: Vec<f64> = results.iter().map(|r| r.distance_km).collect();
        assert_eq!(distances, vec![0.0, 28.92, 40.23, 41.31, 47.44]);
    }

    #[test]
    fn test_nearby_uses_defaults() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let results = orchestrator.nearby::<Beach>(ALCUDIA, None, None).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate.name, "Playa de Alcúdia");

        let wide = NearbyDefaults {
            radius_km: 100.0,
            max_results: 3,
        };
        let orchestrator = QueryOrchestrator::new(&store, wide);
        assert_eq!(orchestrator.nearby::<Beach>(ALCUDIA, None, None).unwrap().len(), 3);
    }

    #[test]
    fn test_nearby_rejects_reference_outside_region() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let barcelona = Coordinate::new(41.3874, 2.1686);
        let err = orchestrator.nearby::<Beach>(barcelona, Some(500.0), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let nan = Coordinate::new(f64::NAN, 3.0);
        let err = orchestrator.nearby::<Beach>(nan, None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_nearby_rejects_bad_radius() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());
        for radius in [-1.0, f64::NAN, f64::INFINITY] {
            let err = orchestrator.nearby::<Beach>(ALCUDIA, Some(radius), None).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput);
        }
    }

    #[test]
    fn test_nearby_excludes_soft_deleted() {
        let store = store();
        store.deactivate::<Beach>(2).unwrap();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let results = orchestrator.nearby::<Beach>(ALCUDIA, Some(30.0), None).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate.id, 1);
    }

    #[test]
    fn test_listing_without_reference_paginates() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let options = ListOptions {
            skip: 1,
            limit: 2,
            ..Default::default()
        };
        let listed = orchestrator
            .list_with_optional_distance::<Beach>(&BeachFilter::default(), &options)
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].item.name, "Cala Mesquida");
        assert!(listed.iter().all(|l| l.distance_km.is_none()));
    }

    #[test]
    fn test_listing_without_reference_ignores_region() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        // Radius alone has no effect without a reference
        let options = ListOptions {
            radius_km: Some(-5.0),
            ..Default::default()
        };
        let listed = orchestrator
            .list_with_optional_distance::<Restaurant>(&RestaurantFilter::default(), &options)
            .unwrap();
        assert_eq!(listed.len(), 5);
    }

    #[test]
    fn test_listing_with_reference_filters_then_ranks() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let coves = BeachFilter {
            beach_type: Some(BeachType::Cove),
            ..Default::default()
        };
        let options = ListOptions {
            reference: Some(ALCUDIA),
            radius_km: Some(45.0),
            order_by_distance: true,
            ..Default::default()
        };
        let listed = orchestrator.list_with_optional_distance::<Beach>(&coves, &options).unwrap();
        let names: Vec<&str> = listed.iter().map(|l| l.item.name.as_str()).collect();
        assert_eq!(names, vec!["Cala Mesquida", "Cala Varques", "Cala Deià"]);
        assert_eq!(listed[0].distance_km, Some(28.92));
    }

    #[test]
    fn test_listing_with_reference_unordered_keeps_store_order() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let options = ListOptions {
            reference: Some(ALCUDIA),
            radius_km: Some(60.0),
            skip: 2,
            limit: 2,
            order_by_distance: false,
        };
        let listed = orchestrator
            .list_with_optional_distance::<Beach>(&BeachFilter::default(), &options)
            .unwrap();
        let ids: Vec<i64> = listed.iter().map(|l| l.item.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(listed[0].distance_km, Some(55.26));
    }

    #[test]
    fn test_listing_with_reference_fails_fast() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());
        let options = ListOptions {
            reference: Some(Coordinate::new(39.5, 5.0)),
            ..Default::default()
        };
        let err = orchestrator
            .list_with_optional_distance::<Beach>(&BeachFilter::default(), &options)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_nearby_any_merges_kinds() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let palma = Coordinate::new(39.5696, 2.6502);
        let places = orchestrator.nearby_any(palma, Some(2.0), Some(20)).unwrap();

        let kinds: std::collections::HashSet<PoiKind> =
            places.iter().map(|p| p.candidate.kind).collect();
        assert!(kinds.contains(&PoiKind::Restaurant));
        assert!(kinds.contains(&PoiKind::Heritage));
        assert!(kinds.contains(&PoiKind::Market));
        assert!(kinds.contains(&PoiKind::Dish));
        assert!(!kinds.contains(&PoiKind::Beach));
        assert!(places.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        assert!(places.iter().all(|p| p.distance_km <= 2.0));
    }

    #[test]
    fn test_nearby_places_restricts_kinds() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let places = orchestrator
            .nearby_places(ALCUDIA, &[PoiKind::Beach], Some(30.0), None)
            .unwrap();
        assert_eq!(places.len(), 2);
        assert!(places.iter().all(|p| p.candidate.kind == PoiKind::Beach));
    }

    #[test]
    fn test_places_nearby_counts_before_cap() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());

        let nearby = orchestrator
            .places_nearby(ALCUDIA, &[PoiKind::Beach], Some(50.0), Some(2))
            .unwrap();
        assert_eq!(nearby.results.len(), 2);
        assert_eq!(nearby.total_within_radius, 5);
        assert_eq!(nearby.radius_km, 50.0);
        assert_eq!(nearby.results[1].distance_km, 28.92);

        store.deactivate::<Beach>(2).unwrap();
        let nearby = orchestrator
            .places_nearby(ALCUDIA, &[PoiKind::Beach], None, None)
            .unwrap();
        assert_eq!(nearby.radius_km, 5.0);
        assert_eq!(nearby.total_within_radius, 1);
    }

    #[test]
    fn test_listing_serializes_flat() {
        let store = store();
        let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());
        let options = ListOptions {
            reference: Some(ALCUDIA),
            limit: 1,
            order_by_distance: true,
            ..Default::default()
        };
        let listed = orchestrator
            .list_with_optional_distance::<Beach>(&BeachFilter::default(), &options)
            .unwrap();
        let json = serde_json::to_value(&listed[0]).unwrap();
        assert_eq!(json["name"], "Playa de Alcúdia");
        assert_eq!(json["distance_km"], 0.0);
    }
}
