//! Pheromone persistence: the durable source of truth across runs.
//!
//! A trait rather than a concrete type so the layout optimizer and the
//! admission selector can run against either a process-scoped in-memory
//! store or a durable database without changing the algorithm.

use crate::error::StoreResult;
use crate::types::*;
use std::collections::HashMap;

/// Default pheromone on a trail or scalar that has never been written.
pub const DEFAULT_PHEROMONE: f64 = 1.0;

/// Durable key-value storage for both kinds of pheromone.
///
/// Edge-keyed trails are directed: `(a, b)` and `(b, a)` are distinct keys.
/// Admission scalars are keyed by `(hospital, bed)`.
pub trait PheromoneStore: Send + Sync {
    /// Backend name, for logging.
    fn name(&self) -> &str;

    /// Fetch every persisted trail whose endpoints both lie in `bed_ids`.
    fn load_trails(&self, bed_ids: &[BedId]) -> StoreResult<Vec<TrailRecord>>;

    /// Upsert one trail value.
    fn save_trail(&self, from: &BedId, to: &BedId, value: f64) -> StoreResult<()>;

    /// Upsert many trail values. Backends may override to batch.
    fn save_trails(&self, records: &[TrailRecord]) -> StoreResult<()> {
        for r in records {
            self.save_trail(&r.from, &r.to, r.value)?;
        }
        Ok(())
    }

    /// Read one admission scalar. `None` if it was never written.
    fn scalar(&self, key: &ScalarKey) -> StoreResult<Option<f64>>;

    /// All scalars recorded for a hospital, keyed by bed.
    fn scalars_for(&self, hospital: &HospitalId) -> StoreResult<HashMap<BedId, f64>>;

    /// Atomically read-modify-write one scalar.
    ///
    /// `update` receives the current value (`None` if absent) and returns
    /// the value to store. No concurrent update of the same key may
    /// interleave between the read and the write. Returns the stored value.
    fn update_scalar(
        &self,
        key: &ScalarKey,
        update: &mut dyn FnMut(Option<f64>) -> f64,
    ) -> StoreResult<f64>;

    /// Number of persisted trails.
    fn trail_count(&self) -> StoreResult<usize>;

    /// Number of persisted scalars.
    fn scalar_count(&self) -> StoreResult<usize>;
}
