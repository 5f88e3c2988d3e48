//! Per-invocation state shared by catalog commands.

use mallorca_catalog::{seed, CatalogStore, NearbyDefaults, QueryOrchestrator};
use mallorca_core::config::{Config, ListingConfig};
use mallorca_core::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct AppContext {
    pub store: CatalogStore,
    pub nearby: NearbyDefaults,
    pub listing: ListingConfig,
    pub json: bool,
}

impl AppContext {
    /// Opens the catalog: `--data` wins over `[general] data_file`; with
    /// neither, the built-in dataset is used.
    pub fn open(config: &Config, data: Option<&Path>, json: bool) -> Result<Self> {
        let data_file = data
            .map(Path::to_path_buf)
            .or_else(|| config.schema.general.data_file.as_ref().map(PathBuf::from));

        let store = match &data_file {
            Some(path) => CatalogStore::load(path)?,
            None => {
                debug!("No snapshot configured, using built-in dataset");
                seed::mallorca()?
            }
        };

        Ok(Self {
            store,
            nearby: NearbyDefaults::from(&config.schema.nearby),
            listing: config.schema.listing.clone(),
            json,
        })
    }

    pub fn orchestrator(&self) -> QueryOrchestrator<'_, CatalogStore> {
        QueryOrchestrator::new(&self.store, self.nearby)
    }
}
