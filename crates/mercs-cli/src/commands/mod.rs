//! CLI command implementations.

pub mod reconcile;
pub mod refresh;
pub mod show;
pub mod watch;

use std::sync::Arc;

use mercs_core::{
    CollectionCache, Config, JsonPreferenceStore, MercenariesMemoryCache, PathsConfig,
    SnapshotFileProvider,
};

/// Configuration with every path resolved against the data directory
pub struct AppContext {
    pub config: Config,
    pub paths: PathsConfig,
}

impl AppContext {
    pub fn new(config: Config, data_dir: &std::path::Path) -> Self {
        let paths = config.paths.resolve(data_dir);
        Self { config, paths }
    }

    pub fn preference_store(&self) -> Arc<JsonPreferenceStore> {
        Arc::new(JsonPreferenceStore::new(&self.paths.preferences))
    }

    pub fn memory_cache(&self) -> MercenariesMemoryCache<SnapshotFileProvider, JsonPreferenceStore> {
        MercenariesMemoryCache::with_config(
            SnapshotFileProvider::new(&self.paths.snapshot),
            self.preference_store(),
            CollectionCache::new(&self.paths.collection_cache),
            &self.config.refresh,
        )
    }
}
