//! Session-owned pheromone trails over directed bed pairs.
//!
//! Each optimization run owns one [`PheromoneMap`]: a directed graph whose
//! edge weights are the trail values, cached in memory and written through
//! to a [`PheromoneStore`]. The store is the source of truth across runs;
//! within a run the in-memory value is authoritative, so a failed write
//! only marks the session as degraded.

use crate::backend::DynPheromoneStore;
use hospice_core::store::DEFAULT_PHEROMONE;
use hospice_core::types::{BedId, TrailRecord};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Directed trail graph for one optimization session.
pub struct PheromoneMap {
    graph: DiGraph<BedId, f64>,
    node_index: HashMap<BedId, NodeIndex>,
    store: DynPheromoneStore,
    loaded: bool,
    write_through: bool,
    degraded_writes: usize,
}

impl PheromoneMap {
    /// Create an empty map writing through to `store`.
    pub fn new(store: DynPheromoneStore) -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            store,
            loaded: false,
            write_through: true,
            degraded_writes: 0,
        }
    }

    fn ensure_node(&mut self, id: &BedId) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(id) {
            idx
        } else {
            let idx = self.graph.add_node(id.clone());
            self.node_index.insert(id.clone(), idx);
            idx
        }
    }

    /// Load persisted trails for the working set and initialise every
    /// missing ordered pair of distinct beds to 1.0, writing those back.
    ///
    /// If the load fails, the session runs on in-memory defaults and
    /// stops writing through, so learned trails in the store are left
    /// intact. Only the first call per session does anything.
    pub fn load(&mut self, bed_ids: &[BedId]) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        for id in bed_ids {
            self.ensure_node(id);
        }

        match self.store.load_trails(bed_ids) {
            Ok(records) => {
                debug!(store = self.store.name(), trails = records.len(), "loaded pheromone trails");
                for r in records {
                    let from = self.ensure_node(&r.from);
                    let to = self.ensure_node(&r.to);
                    self.graph.update_edge(from, to, floor(r.value));
                }
            }
            Err(e) => {
                self.degraded_writes += 1;
                self.write_through = false;
                warn!(
                    store = self.store.name(),
                    error = %e,
                    "pheromone load failed; running on in-memory defaults without persisting"
                );
            }
        }

        let mut missing = Vec::new();
        for a in bed_ids {
            for b in bed_ids {
                if a == b {
                    continue;
                }
                let (ia, ib) = (self.node_index[a], self.node_index[b]);
                if self.graph.find_edge(ia, ib).is_none() {
                    self.graph.add_edge(ia, ib, DEFAULT_PHEROMONE);
                    missing.push(TrailRecord::new(a.clone(), b.clone(), DEFAULT_PHEROMONE));
                }
            }
        }
        if !missing.is_empty() {
            debug!(new_trails = missing.len(), "initialised missing trails");
            self.persist(&missing);
        }
    }

    /// Whether [`load`](Self::load) has run for this session.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current trail value, defaulting to 1.0 for unknown pairs.
    pub fn get(&self, from: &BedId, to: &BedId) -> f64 {
        match (self.node_index.get(from), self.node_index.get(to)) {
            (Some(&a), Some(&b)) => self
                .graph
                .find_edge(a, b)
                .map(|e| self.graph[e])
                .unwrap_or(DEFAULT_PHEROMONE),
            _ => DEFAULT_PHEROMONE,
        }
    }

    /// Set a trail value (floored at zero) and write it through.
    pub fn set(&mut self, from: &BedId, to: &BedId, value: f64) {
        let value = self.set_in_memory(from, to, value);
        self.persist(&[TrailRecord::new(from.clone(), to.clone(), value)]);
    }

    fn set_in_memory(&mut self, from: &BedId, to: &BedId, value: f64) -> f64 {
        let value = floor(value);
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        self.graph.update_edge(a, b, value);
        value
    }

    /// Multiply every known trail by `1 - rate`, traversed or not.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for w in self.graph.edge_weights_mut() {
            *w = floor(*w * keep);
        }
        let records: Vec<TrailRecord> = self
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                Some(TrailRecord::new(
                    self.graph[a].clone(),
                    self.graph[b].clone(),
                    self.graph[e],
                ))
            })
            .collect();
        self.persist(&records);
    }

    /// Add `amount` to every consecutive edge of `path`.
    pub fn deposit(&mut self, path: &[BedId], amount: f64) {
        let mut records = Vec::with_capacity(path.len().saturating_sub(1));
        for pair in path.windows(2) {
            let next = self.get(&pair[0], &pair[1]) + amount;
            let stored = self.set_in_memory(&pair[0], &pair[1], next);
            records.push(TrailRecord::new(pair[0].clone(), pair[1].clone(), stored));
        }
        self.persist(&records);
    }

    fn persist(&mut self, records: &[TrailRecord]) {
        if records.is_empty() || !self.write_through {
            return;
        }
        let result = if records.len() == 1 {
            let r = &records[0];
            self.store.save_trail(&r.from, &r.to, r.value)
        } else {
            self.store.save_trails(records)
        };
        if let Err(e) = result {
            self.degraded_writes += records.len();
            warn!(
                store = self.store.name(),
                trails = records.len(),
                error = %e,
                "pheromone write failed; keeping in-memory values"
            );
        }
    }

    /// Whether values are still being written to the store.
    pub fn is_writing_through(&self) -> bool {
        self.write_through
    }

    /// Number of trail writes (or loads) that failed this session.
    pub fn degraded_writes(&self) -> usize {
        self.degraded_writes
    }

    /// Number of directed trails held in memory.
    pub fn trail_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn floor(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::InMemoryPheromoneStore;
    use hospice_core::error::{StoreError, StoreResult};
    use hospice_core::store::PheromoneStore;
    use hospice_core::types::{HospitalId, ScalarKey};
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Store whose trail reads fail while writes still land.
    #[derive(Default)]
    struct UnreadableTrails {
        inner: InMemoryPheromoneStore,
    }

    impl PheromoneStore for UnreadableTrails {
        fn name(&self) -> &str {
            "unreadable"
        }
        fn load_trails(&self, _: &[BedId]) -> StoreResult<Vec<TrailRecord>> {
            Err(StoreError::Backend("read timeout".into()))
        }
        fn save_trail(&self, from: &BedId, to: &BedId, value: f64) -> StoreResult<()> {
            self.inner.save_trail(from, to, value)
        }
        fn save_trails(&self, records: &[TrailRecord]) -> StoreResult<()> {
            self.inner.save_trails(records)
        }
        fn scalar(&self, key: &ScalarKey) -> StoreResult<Option<f64>> {
            self.inner.scalar(key)
        }
        fn scalars_for(&self, hospital: &HospitalId) -> StoreResult<HashMap<BedId, f64>> {
            self.inner.scalars_for(hospital)
        }
        fn update_scalar(
            &self,
            key: &ScalarKey,
            update: &mut dyn FnMut(Option<f64>) -> f64,
        ) -> StoreResult<f64> {
            self.inner.update_scalar(key, update)
        }
        fn trail_count(&self) -> StoreResult<usize> {
            self.inner.trail_count()
        }
        fn scalar_count(&self) -> StoreResult<usize> {
            self.inner.scalar_count()
        }
    }

    fn ids(names: &[&str]) -> Vec<BedId> {
        names.iter().map(|n| BedId::from(*n)).collect()
    }

    #[test]
    fn load_initialises_all_ordered_pairs() {
        let store = Arc::new(InMemoryPheromoneStore::new());
        let mut map = PheromoneMap::new(store.clone());
        map.load(&ids(&["a", "b", "c"]));

        assert_eq!(map.trail_count(), 6);
        assert_eq!(store.trail_count().unwrap(), 6);
        assert_eq!(map.get(&"a".into(), &"b".into()), 1.0);
    }

    #[test]
    fn load_prefers_persisted_values_and_runs_once() {
        let store = Arc::new(InMemoryPheromoneStore::new());
        store.save_trail(&"a".into(), &"b".into(), 4.0).unwrap();

        let mut map = PheromoneMap::new(store.clone());
        map.load(&ids(&["a", "b"]));
        assert_eq!(map.get(&"a".into(), &"b".into()), 4.0);
        assert_eq!(map.get(&"b".into(), &"a".into()), 1.0);

        store.save_trail(&"a".into(), &"b".into(), 9.0).unwrap();
        map.load(&ids(&["a", "b"]));
        assert!(map.is_loaded());
        assert_eq!(map.get(&"a".into(), &"b".into()), 4.0);
    }

    #[test]
    fn unknown_pair_defaults_to_one() {
        let map = PheromoneMap::new(Arc::new(InMemoryPheromoneStore::new()));
        assert_eq!(map.get(&"x".into(), &"y".into()), 1.0);
    }

    #[test]
    fn set_is_visible_immediately_and_persisted() {
        let store = Arc::new(InMemoryPheromoneStore::new());
        let mut map = PheromoneMap::new(store.clone());
        map.set(&"a".into(), &"b".into(), 2.5);
        assert_eq!(map.get(&"a".into(), &"b".into()), 2.5);
        map.set(&"a".into(), &"b".into(), -3.0);
        assert_eq!(map.get(&"a".into(), &"b".into()), 0.0);

        let persisted = store.load_trails(&ids(&["a", "b"])).unwrap();
        assert_eq!(persisted[0].value, 0.0);
    }

    #[test]
    fn evaporation_without_deposit_decays_geometrically() {
        let mut map = PheromoneMap::new(Arc::new(InMemoryPheromoneStore::new()));
        map.load(&ids(&["a", "b"]));
        let mut previous = map.get(&"a".into(), &"b".into());
        for _ in 0..10 {
            map.evaporate(0.5);
            let now = map.get(&"a".into(), &"b".into());
            assert!(now < previous);
            assert!(now > 0.0);
            previous = now;
        }
        assert!((previous - 0.5f64.powi(10)).abs() < 1e-12);
    }

    #[test]
    fn deposit_touches_only_path_edges_in_direction() {
        let mut map = PheromoneMap::new(Arc::new(InMemoryPheromoneStore::new()));
        map.load(&ids(&["a", "b", "c"]));
        map.deposit(&ids(&["a", "b", "c"]), 0.5);

        assert_eq!(map.get(&"a".into(), &"b".into()), 1.5);
        assert_eq!(map.get(&"b".into(), &"c".into()), 1.5);
        assert_eq!(map.get(&"b".into(), &"a".into()), 1.0);
        assert_eq!(map.get(&"a".into(), &"c".into()), 1.0);
    }

    #[test]
    fn failed_load_leaves_learned_trails_untouched() {
        let store = Arc::new(UnreadableTrails::default());
        store.inner.save_trail(&"a".into(), &"b".into(), 7.5).unwrap();

        let mut map = PheromoneMap::new(store.clone());
        map.load(&ids(&["a", "b", "c"]));
        assert_eq!(map.trail_count(), 6);
        assert_eq!(map.get(&"a".into(), &"b".into()), 1.0);
        assert!(!map.is_writing_through());
        assert_eq!(map.degraded_writes(), 1);

        map.evaporate(0.5);
        map.deposit(&ids(&["a", "b", "c"]), 0.25);
        assert_eq!(map.get(&"a".into(), &"b".into()), 0.75);

        let persisted = store.inner.load_trails(&ids(&["a", "b", "c"])).unwrap();
        assert_eq!(persisted, vec![TrailRecord::new("a".into(), "b".into(), 7.5)]);
    }
}
