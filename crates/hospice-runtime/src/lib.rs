//! # Hospice Runtime
//!
//! The two pheromone-driven components and the stores they persist to.
//!
//! - [`optimizer::LayoutOptimizer`] runs the ant colony over a set of beds
//!   and lays the best tour back onto the floor plan.
//! - [`admission::AdmissionSelector`] picks one available bed for an
//!   incoming patient and reinforces the outcome.
//!
//! Both share a [`backend::DynPheromoneStore`], chosen through
//! [`backend::create_store`].

pub mod memory_store;
pub mod backend;
pub mod pheromone_map;
pub mod tour;
pub mod optimizer;
pub mod bed_provider;
pub mod admission;
pub mod prelude;

#[cfg(feature = "sqlite")]
pub mod sqlite_store;
