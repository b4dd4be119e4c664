//! Hospice Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use hospice_core::prelude::*;
//! ```

pub use crate::types::{
    BedId, HospitalId, RunId,
    Position, Bed, BedStatus, BedPriority,
    ScalarKey, TrailRecord,
};

pub use crate::config::{AcoConfig, AdmissionConfig, LayoutStrategy};

pub use crate::placement::{
    GridSpec, RawBed,
    normalize_beds, parse_position, validate_beds, path_length, sequential_grid_length,
};

pub use crate::heuristic::{distance, heuristic, selection_weight};

pub use crate::selection::{roulette, Fallback, Pick};

pub use crate::store::{PheromoneStore, DEFAULT_PHEROMONE};

pub use crate::provider::{BedProvider, BedDesirability, UniformDesirability};

pub use crate::error::{
    HospiceError, ConfigError, InputError, StoreError, Result, StoreResult,
};
