//! Pheromone store configuration and factory.
//!
//! Provides a unified interface for selecting the persistence backend that
//! both the layout optimizer and the admission selector run against.

use crate::memory_store::InMemoryPheromoneStore;
use hospice_core::error::StoreResult;
use hospice_core::store::PheromoneStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "sqlite")]
use std::path::PathBuf;

/// Configuration for store backend selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StoreConfig {
    /// Process-scoped hash maps (no persistence across restarts).
    InMemory,

    /// SQLite-backed durable storage.
    #[cfg(feature = "sqlite")]
    Sqlite {
        /// Path to the SQLite database file.
        /// If None, uses an in-memory SQLite database.
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::InMemory
    }
}

impl StoreConfig {
    /// Create an in-memory store configuration.
    pub fn in_memory() -> Self {
        StoreConfig::InMemory
    }

    /// Create an SQLite store configuration with a file path.
    #[cfg(feature = "sqlite")]
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        StoreConfig::Sqlite {
            path: Some(path.into()),
        }
    }

    /// Create an SQLite store configuration with in-memory storage.
    #[cfg(feature = "sqlite")]
    pub fn sqlite_in_memory() -> Self {
        StoreConfig::Sqlite { path: None }
    }
}

/// Shared handle to a pheromone store.
pub type DynPheromoneStore = Arc<dyn PheromoneStore>;

/// Create a pheromone store from configuration.
///
/// # Errors
/// Returns an error if the backend cannot be opened (e.g., SQLite file issues).
pub fn create_store(config: &StoreConfig) -> StoreResult<DynPheromoneStore> {
    match config {
        StoreConfig::InMemory => Ok(Arc::new(InMemoryPheromoneStore::new())),

        #[cfg(feature = "sqlite")]
        StoreConfig::Sqlite { path } => {
            use crate::sqlite_store::SqlitePheromoneStore;

            let store = if let Some(p) = path {
                SqlitePheromoneStore::open(p)?
            } else {
                SqlitePheromoneStore::new_in_memory()?
            };
            Ok(Arc::new(store))
        }
    }
}
