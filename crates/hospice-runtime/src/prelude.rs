//! Hospice Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use hospice_runtime::prelude::*;
//! ```

// Layout optimizer
pub use crate::optimizer::{arrange, IterationProgress, LayoutOptimizer, OptimizationReport};
pub use crate::tour::{construct_tour, deposit_amount, order_fitness, path_fitness, Tour};
pub use crate::pheromone_map::PheromoneMap;

// Admission selector
pub use crate::admission::{reinforced_level, AdmissionOutcome, AdmissionSelector};
pub use crate::bed_provider::InMemoryBedProvider;

// Store configuration
pub use crate::backend::{create_store, DynPheromoneStore, StoreConfig};
pub use crate::memory_store::InMemoryPheromoneStore;

#[cfg(feature = "sqlite")]
pub use crate::sqlite_store::SqlitePheromoneStore;

// Re-export from core
pub use hospice_core::prelude::*;
