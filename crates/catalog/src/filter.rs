//! Attribute filters and pagination.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute predicate over one entity kind.
///
/// Soft-deleted rows are excluded before `matches` is consulted unless
/// `include_inactive` returns true.
pub trait AttributeFilter<T>: Send + Sync {
    /// Returns true if the item passes every attribute constraint.
    fn matches(&self, item: &T, ctx: &FilterContext) -> bool;

    /// Whether soft-deleted rows are eligible.
    fn include_inactive(&self) -> bool {
        false
    }
}

/// Lookups a filter may need beyond the row itself.
#[derive(Debug, Clone, Default)]
pub struct FilterContext {
    locality_zones: HashMap<i64, i64>,
}

impl FilterContext {
    /// Builds a context from `(locality_id, zone_id)` pairs.
    pub fn new(locality_zones: impl IntoIterator<Item = (i64, i64)>) -> Self {
        Self {
            locality_zones: locality_zones.into_iter().collect(),
        }
    }

    /// Zone that a locality belongs to.
    pub fn zone_of(&self, locality_id: i64) -> Option<i64> {
        self.locality_zones.get(&locality_id).copied()
    }
}

/// Offset/limit pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Rows to skip
    pub skip: usize,
    /// Maximum rows to return
    pub limit: usize,
}

impl Page {
    /// Creates a page.
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    /// Applies the page to an ordered sequence.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

/// Case-insensitive equality; an unset filter matches everything.
pub(crate) fn eq_ignore_case(filter: Option<&str>, value: &str) -> bool {
    filter.map_or(true, |wanted| wanted.to_lowercase() == value.to_lowercase())
}

/// Case-insensitive substring match; an unset filter matches everything.
pub(crate) fn contains_ignore_case(filter: Option<&str>, value: &str) -> bool {
    filter.map_or(true, |wanted| value.to_lowercase().contains(&wanted.to_lowercase()))
}

/// Exact equality; an unset filter matches everything.
pub(crate) fn eq_opt<T: PartialEq>(filter: Option<T>, value: T) -> bool {
    filter.map_or(true, |wanted| wanted == value)
}
