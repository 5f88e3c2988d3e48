//! Proximity ranking over candidate points of interest.
//!
//! Candidates come from the persistence layer as a flat list. Ranking computes
//! the rounded distance from a reference point to every candidate that has a
//! coordinate, drops those outside the radius, optionally orders the rest by
//! distance, and only then applies offset and limit.

use crate::{distance_km, Coordinate};
use serde::{Deserialize, Serialize};

/// Anything that may carry a location.
///
/// Entities without a known location return `None` and are left out of
/// proximity results.
pub trait Locatable {
    /// The entity's coordinate, if known.
    fn coordinate(&self) -> Option<Coordinate>;
}

impl<T: Locatable + ?Sized> Locatable for &T {
    #[inline]
    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }
}

impl Locatable for Coordinate {
    #[inline]
    fn coordinate(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

/// A candidate paired with its distance from the reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult<T> {
    /// The matched candidate
    pub candidate: T,
    /// Distance from the reference point in kilometers (2 decimals)
    pub distance_km: f64,
}

impl<T> RankedResult<T> {
    /// Maps the candidate, keeping the distance.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RankedResult<U> {
        RankedResult {
            candidate: f(self.candidate),
            distance_km: self.distance_km,
        }
    }
}

impl<T: Clone> RankedResult<&T> {
    /// Clones the borrowed candidate into an owned result.
    pub fn cloned(self) -> RankedResult<T> {
        self.map(Clone::clone)
    }
}

/// Parameters of a single proximity query.
///
/// Built once per request with the `with_*` methods and not modified after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityQuery {
    reference: Coordinate,
    radius_km: Option<f64>,
    max_results: Option<usize>,
    offset: usize,
    order_by_distance: bool,
}

impl ProximityQuery {
    /// Starts a query around `reference`: no radius, no limit, ordered by distance.
    pub fn new(reference: Coordinate) -> Self {
        Self {
            reference,
            radius_km: None,
            max_results: None,
            offset: 0,
            order_by_distance: true,
        }
    }

    /// Keeps only candidates at most `radius_km` away (inclusive).
    #[must_use]
    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Sets or clears the radius.
    #[must_use]
    pub fn with_optional_radius(mut self, radius_km: Option<f64>) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Returns at most `max_results` results.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Sets or clears the result limit.
    #[must_use]
    pub fn with_optional_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    /// Skips the first `offset` results after filtering and sorting.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Enables or disables ordering by distance.
    #[must_use]
    pub fn ordered_by_distance(mut self, order: bool) -> Self {
        self.order_by_distance = order;
        self
    }

    /// Reference point.
    pub fn reference(&self) -> Coordinate {
        self.reference
    }

    /// Radius in kilometers, if any.
    pub fn radius_km(&self) -> Option<f64> {
        self.radius_km
    }

    /// Result limit, if any.
    pub fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    /// Number of leading results skipped.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether results are sorted nearest-first.
    pub fn order_by_distance(&self) -> bool {
        self.order_by_distance
    }
}

/// Ranks borrowed candidates.
///
/// # Example
/// ```
/// use mallorca_geo::{find_nearby, Coordinate, ProximityQuery};
///
/// let alcudia = Coordinate::new(39.8353, 3.1190);
/// let points = vec![
///     Coordinate::new(39.5198, 2.7458), // Palma
///     Coordinate::new(39.7444, 3.4361), // Cala Mesquida
/// ];
///
/// let query = ProximityQuery::new(alcudia).with_radius(30.0);
/// let results = find_nearby(&query, &points);
///
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].distance_km, 28.92);
/// ```
pub fn find_nearby<'a, T>(query: &ProximityQuery, candidates: &'a [T]) -> Vec<RankedResult<&'a T>>
where
    T: Locatable + Sync,
{
    find_nearby_owned(query, candidates.iter().collect())
}

/// Ranks owned candidates, consuming them.
///
/// Candidates without a finite coordinate are dropped. A non-finite reference
/// point yields no results.
pub fn find_nearby_owned<T>(query: &ProximityQuery, candidates: Vec<T>) -> Vec<RankedResult<T>>
where
    T: Locatable + Send,
{
    if !query.reference.is_finite() {
        return Vec::new();
    }

    let reference = query.reference;
    let radius_km = query.radius_km;
    let annotate = move |candidate: T| -> Option<RankedResult<T>> {
        let coord = candidate.coordinate().filter(Coordinate::is_finite)?;
        let distance_km = distance_km(&reference, &coord);
        match radius_km {
            Some(radius) if distance_km > radius || radius.is_nan() => None,
            _ => Some(RankedResult { candidate, distance_km }),
        }
    };

    #[cfg(feature = "parallel")]
    let mut results: Vec<RankedResult<T>> = {
        use rayon::prelude::*;
        candidates.into_par_iter().filter_map(annotate).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let mut results: Vec<RankedResult<T>> = candidates.into_iter().filter_map(annotate).collect();

    if query.order_by_distance {
        // Stable: equal distances keep the upstream order.
        results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    }

    let limit = query.max_results.unwrap_or(usize::MAX);
    if query.offset == 0 && results.len() <= limit {
        return results;
    }
    results.into_iter().skip(query.offset).take(limit).collect()
}

/// Counts candidates within `radius_km` of `reference`.
pub fn count_within_radius<T: Locatable>(
    reference: &Coordinate,
    candidates: &[T],
    radius_km: f64,
) -> usize {
    candidates
        .iter()
        .filter_map(Locatable::coordinate)
        .filter(Coordinate::is_finite)
        .filter(|coord| distance_km(reference, coord) <= radius_km)
        .count()
}
