//! Mallorca points of interest catalog.
//!
//! This crate provides:
//! - Domain entities (beaches, restaurants, heritage sites, markets, typical
//!   dishes, zones and localities)
//! - [`CatalogStore`], an in-memory store persisted as a JSON snapshot
//! - Attribute filters and pagination
//! - [`QueryOrchestrator`], which gates reference points on the region and
//!   combines attribute filtering with proximity ranking
//!
//! # Example
//!
//! ```
//! use mallorca_catalog::{seed, Beach, NearbyDefaults, QueryOrchestrator};
//! use mallorca_geo::Coordinate;
//!
//! let store = seed::mallorca().unwrap();
//! let orchestrator = QueryOrchestrator::new(&store, NearbyDefaults::default());
//!
//! let alcudia = Coordinate::new(39.8353, 3.1190);
//! let beaches = orchestrator.nearby::<Beach>(alcudia, Some(50.0), Some(2)).unwrap();
//!
//! assert_eq!(beaches[0].candidate.name, "Playa de Alcúdia");
//! assert_eq!(beaches[1].distance_km, 28.92);
//! ```

pub mod filter;
pub mod model;
pub mod query;
pub mod seed;
pub mod snapshot;
pub mod store;
pub mod tags;

pub use filter::{AttributeFilter, FilterContext, Page};
pub use model::{
    AccessLevel, Beach, BeachDraft, BeachFilter, BeachType, Dish, DishDraft, DishFilter, Draft,
    HeritageDraft, HeritageFilter, HeritageSite, LocalMarket, Locality, LocalityDraft,
    LocalityFilter, LocalityType, MarketDraft, MarketFilter, PlaceSummary, PoiKind,
    PointOfInterest, PriceRange, Record, Restaurant, RestaurantDraft, RestaurantFilter, Zone,
    ZoneDraft, ZoneFilter,
};
pub use query::{
    CandidateSource, ListOptions, Listing, NearbyDefaults, PlacesNearby, QueryOrchestrator,
};
pub use snapshot::Snapshot;
pub use store::{CatalogStats, CatalogStore};
