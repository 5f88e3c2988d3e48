//! In-memory catalog store.
//!
//! One [`Table`] per entity kind, each behind its own `RwLock`. Reads clone
//! rows out so callers never hold a lock while ranking or rendering.
//!
//! Writes that check or change references between tables (`create`, `update`,
//! `delete`) run under a store-wide mutex, taken before any table lock.

use crate::filter::{AttributeFilter, FilterContext, Page};
use crate::model::{
    Beach, Dish, Draft, HeritageSite, LocalMarket, Locality, Parent, Record, Restaurant, Zone,
};
use chrono::Utc;
use mallorca_core::{Error, ErrorCode, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[derive(Debug)]
struct TableState<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

/// Rows of one kind keyed by id. Ids are allocated sequentially from 1.
#[derive(Debug)]
pub struct Table<T> {
    state: RwLock<TableState<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            state: RwLock::new(TableState {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<T: Record> Table<T> {
    /// Rebuilds a table from persisted rows; the next id follows the largest one.
    pub(crate) fn from_rows(rows: Vec<T>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for row in rows {
            let id = row.id();
            if id < 1 {
                return Err(Error::new(
                    ErrorCode::InvalidData,
                    format!("{} has invalid id {}", T::KIND, id),
                ));
            }
            if map.insert(id, row).is_some() {
                return Err(Error::new(
                    ErrorCode::InvalidData,
                    format!("Duplicate {} id {}", T::KIND, id),
                ));
            }
        }
        let next_id = map.keys().next_back().map_or(1, |last| last + 1);
        Ok(Self {
            state: RwLock::new(TableState { next_id, rows: map }),
        })
    }

    /// All rows in id order, inactive included.
    pub(crate) fn rows(&self) -> Vec<T> {
        self.read().rows.values().cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, TableState<T>> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableState<T>> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Gives generic store operations access to the table for `T`.
pub trait TableOf<T: Record> {
    /// The table holding rows of `T`.
    fn table(&self) -> &Table<T>;
}

/// Row counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub zones: usize,
    pub localities: usize,
    pub beaches: usize,
    pub restaurants: usize,
    pub heritage_sites: usize,
    pub markets: usize,
    pub dishes: usize,
}

/// The whole catalog.
#[derive(Debug, Default)]
pub struct CatalogStore {
    pub(crate) zones: Table<Zone>,
    pub(crate) localities: Table<Locality>,
    pub(crate) beaches: Table<Beach>,
    pub(crate) restaurants: Table<Restaurant>,
    pub(crate) heritage_sites: Table<HeritageSite>,
    pub(crate) markets: Table<LocalMarket>,
    pub(crate) dishes: Table<Dish>,
    /// Held across a parent check and the write that relies on it.
    pub(crate) links: Mutex<()>,
}

macro_rules! table_of {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl TableOf<$ty> for CatalogStore {
                fn table(&self) -> &Table<$ty> {
                    &self.$field
                }
            }
        )*
    };
}

table_of! {
    Zone => zones,
    Locality => localities,
    Beach => beaches,
    Restaurant => restaurants,
    HeritageSite => heritage_sites,
    LocalMarket => markets,
    Dish => dishes,
}

impl CatalogStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the draft and inserts a new active row.
    pub fn create<T: Record>(&self, draft: T::Draft) -> Result<T>
    where
        Self: TableOf<T>,
    {
        draft.validate().to_result()?;
        let _links = self.lock_links();
        self.ensure_parent(T::parent(&draft))?;

        let mut state = self.table().write();
        let id = state.next_id;
        state.next_id += 1;
        let row = T::from_draft(id, draft, Utc::now());
        state.rows.insert(id, row.clone());

        debug!(kind = T::KIND, id, "Created record");
        Ok(row)
    }

    /// Fetches a row by id, inactive rows included.
    pub fn get<T: Record>(&self, id: i64) -> Result<T>
    where
        Self: TableOf<T>,
    {
        self.table()
            .read()
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(T::KIND, id))
    }

    /// Replaces every editable field of an existing row.
    pub fn update<T: Record>(&self, id: i64, draft: T::Draft) -> Result<T>
    where
        Self: TableOf<T>,
    {
        draft.validate().to_result()?;
        let _links = self.lock_links();
        self.ensure_parent(T::parent(&draft))?;

        let mut state = self.table().write();
        let row = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(T::KIND, id))?;
        row.apply_draft(draft, Utc::now());

        debug!(kind = T::KIND, id, "Updated record");
        Ok(row.clone())
    }

    /// Removes a row. Fails with `Conflict` while other rows still reference it.
    pub fn delete<T: Record>(&self, id: i64) -> Result<()>
    where
        Self: TableOf<T>,
    {
        let _links = self.lock_links();
        self.get::<T>(id)?;

        let dependents = T::dependents(self, id)?;
        if dependents > 0 {
            return Err(Error::conflict(format!(
                "{} {} is still referenced by {} record(s)",
                T::KIND,
                id,
                dependents
            ))
            .with_suggestion("Delete or reassign the dependent records first"));
        }

        self.table()
            .write()
            .rows
            .remove(&id)
            .ok_or_else(|| Error::not_found(T::KIND, id))?;

        info!(kind = T::KIND, id, "Deleted record");
        Ok(())
    }

    /// Soft delete: the row stays but drops out of default listings.
    pub fn deactivate<T: Record>(&self, id: i64) -> Result<T>
    where
        Self: TableOf<T>,
    {
        let mut state = self.table().write();
        let row = state
            .rows
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(T::KIND, id))?;
        row.set_active(false, Utc::now());

        debug!(kind = T::KIND, id, "Deactivated record");
        Ok(row.clone())
    }

    /// Filtered rows in id order, paginated.
    pub fn list<T: Record>(&self, filter: &T::Filter, page: Page) -> Vec<T>
    where
        Self: TableOf<T>,
    {
        page.apply(self.matching(filter))
    }

    /// Number of rows passing the filter.
    pub fn count<T: Record>(&self, filter: &T::Filter) -> usize
    where
        Self: TableOf<T>,
    {
        self.matching(filter).len()
    }

    /// Row counts per kind, inactive included.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            zones: self.zones.read().rows.len(),
            localities: self.localities.read().rows.len(),
            beaches: self.beaches.read().rows.len(),
            restaurants: self.restaurants.read().rows.len(),
            heritage_sites: self.heritage_sites.read().rows.len(),
            markets: self.markets.read().rows.len(),
            dishes: self.dishes.read().rows.len(),
        }
    }

    /// Every row passing the filter, in id order.
    pub(crate) fn matching<T: Record>(&self, filter: &T::Filter) -> Vec<T>
    where
        Self: TableOf<T>,
    {
        // Built before taking T's lock; T may be Locality itself.
        let ctx = self.filter_context();
        self.table()
            .read()
            .rows
            .values()
            .filter(|row| {
                (filter.include_inactive() || row.is_active()) && filter.matches(row, &ctx)
            })
            .cloned()
            .collect()
    }

    fn filter_context(&self) -> FilterContext {
        let state = self.localities.read();
        FilterContext::new(state.rows.values().map(|l| (l.id, l.zone_id)))
    }

    fn lock_links(&self) -> MutexGuard<'_, ()> {
        self.links.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn ensure_parent(&self, parent: Option<Parent>) -> Result<()> {
        match parent {
            Some(Parent::Zone(id)) => self.get::<Zone>(id).map(|_| ()),
            Some(Parent::Locality(id)) => self.get::<Locality>(id).map(|_| ()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AccessLevel, BeachDraft, BeachFilter, BeachType, LocalityDraft, LocalityFilter,
        LocalityType, ZoneDraft, ZoneFilter,
    };

    fn beach_draft(name: &str, locality_id: i64) -> BeachDraft {
        BeachDraft {
            name: name.to_string(),
            description: "Arena blanca y aguas cristalinas.".to_string(),
            image: None,
            beach_type: BeachType::Sand,
            access: AccessLevel::Easy,
            services: vec!["parking".to_string()],
            featured: false,
            locality_id,
            latitude: Some(39.8353),
            longitude: Some(3.1190),
        }
    }

    fn store_with_locality() -> (CatalogStore, i64) {
        let store = CatalogStore::new();
        let zone: Zone = store.create(ZoneDraft::new("Raiguer")).unwrap();
        let locality: Locality = store
            .create(LocalityDraft::new("Alcúdia", LocalityType::Town, zone.id))
            .unwrap();
        (store, locality.id)
    }

    #[test]
    fn test_ids_are_sequential_per_table() {
        let (store, locality_id) = store_with_locality();
        assert_eq!(locality_id, 1);

        let first: Beach = store.create(beach_draft("Playa de Alcúdia", locality_id)).unwrap();
        let second: Beach = store.create(beach_draft("Playa de Muro", locality_id)).unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert!(first.is_active);
    }

    #[test]
    fn test_create_rejects_invalid_draft() {
        let (store, locality_id) = store_with_locality();
        let err = store.create::<Beach>(beach_draft("Pl", locality_id)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(store.stats().beaches, 0);
    }

    #[test]
    fn test_create_requires_existing_parent() {
        let (store, _) = store_with_locality();
        let err = store.create::<Beach>(beach_draft("Playa de Muro", 99)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("Locality 99"));

        let err = store
            .create::<Locality>(LocalityDraft::new("Muro", LocalityType::Town, 42))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_get_update_not_found() {
        let (store, locality_id) = store_with_locality();
        assert_eq!(store.get::<Beach>(7).unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(
            store.update::<Beach>(7, beach_draft("Playa de Muro", locality_id)).unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_update_replaces_fields() {
        let (store, locality_id) = store_with_locality();
        let beach: Beach = store.create(beach_draft("Playa de Muro", locality_id)).unwrap();

        let mut draft = beach_draft("Platja de Muro", locality_id);
        draft.featured = true;
        let updated: Beach = store.update(beach.id, draft).unwrap();

        assert_eq!(updated.name, "Platja de Muro");
        assert!(updated.featured);
        assert_eq!(updated.created_at, beach.created_at);
        assert_eq!(store.get::<Beach>(beach.id).unwrap(), updated);
    }

    #[test]
    fn test_deactivate_hides_from_default_listing() {
        let (store, locality_id) = store_with_locality();
        let keep: Beach = store.create(beach_draft("Playa de Alcúdia", locality_id)).unwrap();
        let gone: Beach = store.create(beach_draft("Playa de Muro", locality_id)).unwrap();

        store.deactivate::<Beach>(gone.id).unwrap();

        let active = store.list::<Beach>(&BeachFilter::default(), Page::default());
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, keep.id);

        let all = BeachFilter {
            include_inactive: true,
            ..Default::default()
        };
        assert_eq!(store.count::<Beach>(&all), 2);
        assert!(!store.get::<Beach>(gone.id).unwrap().is_active);
    }

    #[test]
    fn test_delete_conflicts_with_dependents() {
        let (store, locality_id) = store_with_locality();
        let beach: Beach = store.create(beach_draft("Playa de Alcúdia", locality_id)).unwrap();

        let err = store.delete::<Locality>(locality_id).unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        let err = store.delete::<Zone>(1).unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        store.delete::<Beach>(beach.id).unwrap();
        store.delete::<Locality>(locality_id).unwrap();
        store.delete::<Zone>(1).unwrap();

        assert_eq!(store.count::<Zone>(&ZoneFilter::default()), 0);
        assert_eq!(store.delete::<Zone>(1).unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_soft_deleted_dependents_still_block_delete() {
        let (store, locality_id) = store_with_locality();
        let beach: Beach = store.create(beach_draft("Playa de Alcúdia", locality_id)).unwrap();
        store.deactivate::<Beach>(beach.id).unwrap();

        assert_eq!(store.delete::<Locality>(locality_id).unwrap_err().code, ErrorCode::Conflict);
    }

    #[test]
    fn test_list_paginates_and_filters_by_zone() {
        let store = CatalogStore::new();
        let north: Zone = store.create(ZoneDraft::new("Tramuntana")).unwrap();
        let south: Zone = store.create(ZoneDraft::new("Migjorn")).unwrap();
        let alcudia: Locality = store
            .create(LocalityDraft::new("Alcúdia", LocalityType::Town, north.id))
            .unwrap();
        let campos: Locality = store
            .create(LocalityDraft::new("Campos", LocalityType::Town, south.id))
            .unwrap();

        for i in 0..5 {
            store
                .create::<Beach>(beach_draft(&format!("Platja Nord {}", i), alcudia.id))
                .unwrap();
        }
        store.create::<Beach>(beach_draft("Es Trenc", campos.id)).unwrap();

        let south_only = BeachFilter {
            zone_id: Some(south.id),
            ..Default::default()
        };
        let found = store.list::<Beach>(&south_only, Page::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Es Trenc");

        let page = store.list::<Beach>(&BeachFilter::default(), Page::new(2, 2));
        let ids: Vec<i64> = page.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 4]);

        let by_zone = LocalityFilter {
            zone_id: Some(north.id),
            ..Default::default()
        };
        assert_eq!(store.count::<Locality>(&by_zone), 1);
    }

    #[test]
    fn test_concurrent_delete_and_create_leave_no_orphans() {
        use std::sync::Barrier;
        use std::thread;

        let store = CatalogStore::new();
        for round in 0..200 {
            let zone: Zone = store.create(ZoneDraft::new(format!("Zona {}", round))).unwrap();
            let barrier = Barrier::new(2);

            let (created, deleted) = thread::scope(|s| {
                let create = s.spawn(|| {
                    barrier.wait();
                    let draft = LocalityDraft::new("Sóller", LocalityType::Town, zone.id);
                    store.create::<Locality>(draft)
                });
                let delete = s.spawn(|| {
                    barrier.wait();
                    store.delete::<Zone>(zone.id)
                });
                (create.join().unwrap(), delete.join().unwrap())
            });

            // Exactly one side wins
            assert_ne!(created.is_ok(), deleted.is_ok(), "round {}", round);
            if let Err(err) = deleted {
                assert_eq!(err.code, ErrorCode::Conflict);
            }
        }

        let all = LocalityFilter {
            include_inactive: true,
            ..Default::default()
        };
        for locality in store.list::<Locality>(&all, Page::new(0, usize::MAX)) {
            assert!(store.get::<Zone>(locality.zone_id).is_ok(), "orphan locality {}", locality.id);
        }
    }

    #[test]
    fn test_from_rows_continues_ids() {
        let now = Utc::now();
        let rows = vec![
            Zone::from_draft(3, ZoneDraft::new("Levante"), now),
            Zone::from_draft(8, ZoneDraft::new("Migjorn"), now),
        ];
        let table = Table::from_rows(rows).unwrap();
        assert_eq!(table.read().next_id, 9);

        let dup = vec![
            Zone::from_draft(2, ZoneDraft::new("Levante"), now),
            Zone::from_draft(2, ZoneDraft::new("Migjorn"), now),
        ];
        assert_eq!(Table::from_rows(dup).unwrap_err().code, ErrorCode::InvalidData);
    }
}
