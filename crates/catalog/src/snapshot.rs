//! JSON snapshot persistence.
//!
//! Beaches and dishes are written as rows whose tag lists are comma-joined
//! strings; every other entity is stored as-is.

use crate::model::{
    AccessLevel, Beach, BeachType, Dish, HeritageSite, LocalMarket, Locality, Restaurant, Zone,
};
use crate::store::{CatalogStore, Table};
use crate::tags;
use chrono::{DateTime, Utc};
use mallorca_core::{Error, ErrorCode, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Current snapshot layout.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of a whole store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub localities: Vec<Locality>,
    #[serde(default)]
    pub beaches: Vec<BeachRow>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub heritage_sites: Vec<HeritageSite>,
    #[serde(default)]
    pub markets: Vec<LocalMarket>,
    #[serde(default)]
    pub dishes: Vec<DishRow>,
}

/// Stored beach; `services` is a comma-joined string on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeachRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub beach_type: BeachType,
    pub access: AccessLevel,
    #[serde(with = "tags::comma_joined", default)]
    pub services: Vec<String>,
    pub featured: bool,
    pub locality_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Beach> for BeachRow {
    fn from(b: Beach) -> Self {
        Self {
            id: b.id,
            name: b.name,
            description: b.description,
            image: b.image,
            beach_type: b.beach_type,
            access: b.access,
            services: b.services,
            featured: b.featured,
            locality_id: b.locality_id,
            latitude: b.latitude,
            longitude: b.longitude,
            is_active: b.is_active,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

impl From<BeachRow> for Beach {
    fn from(row: BeachRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            image: row.image,
            beach_type: row.beach_type,
            access: row.access,
            services: row.services,
            featured: row.featured,
            locality_id: row.locality_id,
            latitude: row.latitude,
            longitude: row.longitude,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Stored dish; `ingredients` is a comma-joined string on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(with = "tags::comma_joined", default)]
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

impl From<Dish> for DishRow {
    fn from(d: Dish) -> Self {
        Self {
            id: d.id,
            name: d.name,
            category: d.category,
            description: d.description,
            ingredients: d.ingredients,
            image: d.image,
            preparation: d.preparation,
            where_to_try: d.where_to_try,
            latitude: d.latitude,
            longitude: d.longitude,
            is_active: d.is_active,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

impl From<DishRow> for Dish {
    fn from(row: DishRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            description: row.description,
            ingredients: row.ingredients,
            image: row.image,
            preparation: row.preparation,
            where_to_try: row.where_to_try,
            latitude: row.latitude,
            longitude: row.longitude,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl CatalogStore {
    /// Copies every table into a snapshot.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            zones: self.zones.rows(),
            localities: self.localities.rows(),
            beaches: self.beaches.rows().into_iter().map(BeachRow::from).collect(),
            restaurants: self.restaurants.rows(),
            heritage_sites: self.heritage_sites.rows(),
            markets: self.markets.rows(),
            dishes: self.dishes.rows().into_iter().map(DishRow::from).collect(),
        }
    }

    /// Rebuilds a store from a snapshot.
    ///
    /// Ids must be unique per table. References between rows are not
    /// re-checked.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::new(
                ErrorCode::InvalidData,
                format!("Unsupported snapshot version {}", snapshot.version),
            )
            .with_suggestion(format!("Expected version {}", SNAPSHOT_VERSION)));
        }

        Ok(Self {
            zones: Table::from_rows(snapshot.zones)?,
            localities: Table::from_rows(snapshot.localities)?,
            beaches: Table::from_rows(snapshot.beaches.into_iter().map(Beach::from).collect())?,
            restaurants: Table::from_rows(snapshot.restaurants)?,
            heritage_sites: Table::from_rows(snapshot.heritage_sites)?,
            markets: Table::from_rows(snapshot.markets)?,
            dishes: Table::from_rows(snapshot.dishes.into_iter().map(Dish::from).collect())?,
            links: Mutex::new(()),
        })
    }

    /// Loads a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let content = fs::read_to_string(path)
            .map_err(Error::from)
            .context(format!("Reading {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(Error::from)
            .context(format!("Parsing {}", path.display()))?;
        let store = Self::from_snapshot(snapshot).context(format!("Loading {}", path.display()))?;

        info!(path = %path.display(), "Loaded catalog snapshot");
        Ok(store)
    }

    /// Writes the store as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(Error::from)
                .context(format!("Creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.to_snapshot())?;
        fs::write(path, json)
            .map_err(Error::from)
            .context(format!("Writing {}", path.display()))?;

        info!(path = %path.display(), "Saved catalog snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Page;
    use crate::model::{BeachFilter, DishFilter};
    use crate::seed;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("catalog.json");

        let store = seed::mallorca().unwrap();
        store.deactivate::<Beach>(6).unwrap();
        store.save(&path).unwrap();

        let loaded = CatalogStore::load(&path).unwrap();
        assert_eq!(loaded.stats(), store.stats());
        assert_eq!(loaded.get::<Beach>(1).unwrap(), store.get::<Beach>(1).unwrap());
        assert!(!loaded.get::<Beach>(6).unwrap().is_active);

        let dishes = loaded.list::<Dish>(&DishFilter::default(), Page::default());
        assert!(dishes.iter().any(|d| !d.ingredients.is_empty()));
    }

    #[test]
    fn test_tags_are_comma_joined_on_disk() {
        let store = seed::mallorca().unwrap();
        let json = serde_json::to_value(store.to_snapshot()).unwrap();
        assert_eq!(
            json["beaches"][2]["services"],
            serde_json::json!("parking,chiringuitos,hamacas")
        );
    }

    #[test]
    fn test_ids_continue_after_load() {
        let store = CatalogStore::from_snapshot(seed::mallorca().unwrap().to_snapshot()).unwrap();
        let beaches = store.count::<Beach>(&BeachFilter::default());

        let template = store.get::<Beach>(2).unwrap();
        let draft = crate::model::BeachDraft {
            name: "Cala Agulla".to_string(),
            description: template.description,
            image: None,
            beach_type: template.beach_type,
            access: template.access,
            services: template.services,
            featured: false,
            locality_id: template.locality_id,
            latitude: Some(39.7178),
            longitude: Some(3.4589),
        };
        let created: Beach = store.create(draft).unwrap();
        assert_eq!(created.id, beaches as i64 + 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = CatalogStore::load(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{"version": 9}"#).unwrap();

        let err = CatalogStore::load(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidData);
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();

        let err = CatalogStore::load(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidData);
        assert!(err.context.unwrap().contains("Parsing"));
    }

    #[test]
    fn test_missing_services_column_reads_as_empty() {
        let row: BeachRow = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Cala Varques",
            "description": "Cala virgen de difícil acceso.",
            "image": null,
            "beach_type": "cala",
            "access": "difícil",
            "featured": true,
            "locality_id": 1,
            "latitude": 39.5007,
            "longitude": 3.2977,
            "is_active": true,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert!(row.services.is_empty());
        assert_eq!(row.beach_type, BeachType::Cove);
    }
}
