//! In-memory pheromone store.
//!
//! Process-scoped: values survive between runs in the same process but not
//! across restarts. Useful for tests, demos and the stateless optimize path.

use hospice_core::error::{StoreError, StoreResult};
use hospice_core::store::PheromoneStore;
use hospice_core::types::*;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Pheromone store backed by two locked hash maps.
#[derive(Default)]
pub struct InMemoryPheromoneStore {
    trails: RwLock<HashMap<(BedId, BedId), f64>>,
    scalars: RwLock<HashMap<ScalarKey, f64>>,
}

impl InMemoryPheromoneStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err(e: impl std::fmt::Display) -> StoreError {
    StoreError::Lock(e.to_string())
}

impl PheromoneStore for InMemoryPheromoneStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn load_trails(&self, bed_ids: &[BedId]) -> StoreResult<Vec<TrailRecord>> {
        let wanted: HashSet<&BedId> = bed_ids.iter().collect();
        let trails = self.trails.read().map_err(lock_err)?;
        Ok(trails
            .iter()
            .filter(|((from, to), _)| wanted.contains(from) && wanted.contains(to))
            .map(|((from, to), value)| TrailRecord::new(from.clone(), to.clone(), *value))
            .collect())
    }

    fn save_trail(&self, from: &BedId, to: &BedId, value: f64) -> StoreResult<()> {
        let mut trails = self.trails.write().map_err(lock_err)?;
        trails.insert((from.clone(), to.clone()), value);
        Ok(())
    }

    fn save_trails(&self, records: &[TrailRecord]) -> StoreResult<()> {
        let mut trails = self.trails.write().map_err(lock_err)?;
        for r in records {
            trails.insert((r.from.clone(), r.to.clone()), r.value);
        }
        Ok(())
    }

    fn scalar(&self, key: &ScalarKey) -> StoreResult<Option<f64>> {
        let scalars = self.scalars.read().map_err(lock_err)?;
        Ok(scalars.get(key).copied())
    }

    fn scalars_for(&self, hospital: &HospitalId) -> StoreResult<HashMap<BedId, f64>> {
        let scalars = self.scalars.read().map_err(lock_err)?;
        Ok(scalars
            .iter()
            .filter(|(key, _)| &key.hospital_id == hospital)
            .map(|(key, value)| (key.bed_id.clone(), *value))
            .collect())
    }

    fn update_scalar(
        &self,
        key: &ScalarKey,
        update: &mut dyn FnMut(Option<f64>) -> f64,
    ) -> StoreResult<f64> {
        // The write guard spans both the read and the write.
        let mut scalars = self.scalars.write().map_err(lock_err)?;
        let next = update(scalars.get(key).copied());
        scalars.insert(key.clone(), next);
        Ok(next)
    }

    fn trail_count(&self) -> StoreResult<usize> {
        Ok(self.trails.read().map_err(lock_err)?.len())
    }

    fn scalar_count(&self) -> StoreResult<usize> {
        Ok(self.scalars.read().map_err(lock_err)?.len())
    }
}
