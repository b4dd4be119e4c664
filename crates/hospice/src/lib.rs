//! # Hospice Colony
//!
//! Ant colony optimization for hospital beds.
//!
//! Two components share one pheromone model of weighted choice, evaporation
//! and deposit:
//!
//! - **Layout optimizer** - ants walk every bed of a ward; the shortest
//!   walk found is laid back onto the floor plan so beds visited in
//!   sequence sit next to each other.
//! - **Admission selector** - picks an available bed for an incoming
//!   patient and learns which beds work out, one durable scalar per
//!   (hospital, bed).
//!
//! ## Quick Start
//!
//! ```rust
//! use hospice::prelude::*;
//! use std::sync::Arc;
//!
//! let beds = vec![
//!     Bed::new("b1", "ICU", Position::new(0.0, 0.0)),
//!     Bed::new("b2", "ICU", Position::new(10.0, 0.0)),
//!     Bed::new("b3", "ICU", Position::new(0.0, 10.0)),
//! ];
//!
//! let optimizer = LayoutOptimizer::new(Arc::new(InMemoryPheromoneStore::new()));
//! let config = AcoConfig::default().with_iterations(20).with_ant_count(10).with_seed(1);
//! let report = optimizer.optimize(&beds, &config).unwrap();
//!
//! assert_eq!(report.beds.len(), 3);
//! assert!(report.best_fitness <= 0.0);
//! ```
//!
//! ## Admission
//!
//! ```rust
//! use hospice::prelude::*;
//! use std::sync::Arc;
//!
//! let provider = Arc::new(InMemoryBedProvider::new(vec![
//!     Bed::new("icu-1", "ICU", Position::new(0.0, 0.0)).with_hospital("st-mary"),
//! ]));
//! let store = create_store(&StoreConfig::in_memory()).unwrap();
//! let selector = AdmissionSelector::new(provider, store, AdmissionConfig::default()).unwrap();
//!
//! let outcome = selector.admit(&"st-mary".into(), "ICU", 5).unwrap();
//! assert_eq!(
//!     outcome,
//!     AdmissionOutcome::Admitted { bed_id: "icu-1".into(), pheromone: 1.5 },
//! );
//! ```
//!
//! ## Architecture
//!
//! - [`hospice_core`] - Shared types, errors, configs, traits and sampling
//! - [`hospice_runtime`] - Stores, layout optimizer, admission selector
//!
//! ## Persistence
//!
//! With the default `sqlite` feature, trails and admission scalars survive
//! restarts:
//!
//! ```rust,ignore
//! use hospice::prelude::*;
//!
//! let store = create_store(&StoreConfig::sqlite("hospice.db"))?;
//! ```

pub use hospice_core as core;
pub use hospice_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use hospice::prelude::*;
/// ```
pub mod prelude {
    pub use hospice_runtime::prelude::*;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
