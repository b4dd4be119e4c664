//! # Hospice Core
//!
//! Core types, traits and sampling primitives for Hospice Colony.
//!
//! Two components share this crate's skeleton of pheromone-weighted choice,
//! evaporation and deposit:
//!
//! - **Layout optimizer** - ants build full bed-visitation tours over
//!   directed edge trails; the shortest tour drives a compact floor layout.
//! - **Admission selector** - a single roulette spin over per-(hospital, bed)
//!   scalars picks the bed for a newly admitted patient.
//!
//! ## Quick Start
//!
//! ```rust
//! use hospice_core::prelude::*;
//!
//! let a = Bed::new("b1", "ICU", Position::new(0.0, 0.0));
//! let b = Bed::new("b2", "ICU", Position::new(3.0, 4.0));
//! assert_eq!(distance(&a, &b), 5.0);
//! assert!(AcoConfig::default().validate().is_ok());
//! ```

pub mod types;
pub mod error;
pub mod config;
pub mod placement;
pub mod heuristic;
pub mod selection;
pub mod store;
pub mod provider;
pub mod prelude;
