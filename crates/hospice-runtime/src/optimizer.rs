//! Layout optimizer: the ant colony run over a hospital's beds.
//!
//! # How It Works
//!
//! 1. Load (or initialise) directed trails for every ordered bed pair.
//! 2. Each iteration, `ant_count` ants build full tours independently.
//!    The best tour seen across the whole run is kept (elitist tracking).
//! 3. After all ants of an iteration finish, every trail evaporates by
//!    `evaporation_rate`, then each ant deposits `1 / length` on its edges.
//!    No ant of the next iteration starts before this barrier completes.
//! 4. The best tour is laid back onto the floor plan.

use crate::backend::DynPheromoneStore;
use crate::pheromone_map::PheromoneMap;
use crate::tour::{construct_tour, order_fitness, Tour};
use hospice_core::config::{AcoConfig, LayoutStrategy};
use hospice_core::error::Result;
use hospice_core::placement::{validate_beds, GridSpec};
use hospice_core::types::{Bed, BedId, RunId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

/// Progress reported after each iteration's pheromone update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationProgress {
    /// Zero-based iteration index.
    pub iteration: usize,
    pub total_iterations: usize,
    /// Best fitness among this iteration's ants.
    pub iteration_best: f64,
    /// Best fitness seen so far in the run.
    pub overall_best: f64,
}

/// Full outcome of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub run_id: RunId,
    /// Input beds in best-tour order, positions per the layout strategy.
    pub beds: Vec<Bed>,
    /// Best tour as bed ids in visiting order.
    pub best_tour: Vec<BedId>,
    /// Fitness of the best tour (negated length).
    pub best_fitness: f64,
    /// Fitness of the input order, for comparison.
    pub initial_fitness: f64,
    /// Running best after each iteration.
    pub history: Vec<f64>,
    pub iterations_run: usize,
    /// Roulette spins that fell back to the first unvisited bed.
    pub fallback_steps: usize,
    /// Trail writes that failed; the run continued on in-memory values.
    pub degraded_writes: usize,
}

impl OptimizationReport {
    fn trivial(beds: Vec<Bed>) -> Self {
        Self {
            run_id: RunId::new(),
            best_tour: beds.iter().map(|b| b.id.clone()).collect(),
            beds,
            best_fitness: 0.0,
            initial_fitness: 0.0,
            history: Vec::new(),
            iterations_run: 0,
            fallback_steps: 0,
            degraded_writes: 0,
        }
    }

    /// Whether any pheromone persistence failed during the run.
    pub fn persistence_degraded(&self) -> bool {
        self.degraded_writes > 0
    }
}

/// Runs ant colony optimization over bed layouts.
///
/// Holds only the store handle and grid; every run builds its own
/// [`PheromoneMap`], so concurrent runs never share in-memory trails.
pub struct LayoutOptimizer {
    store: DynPheromoneStore,
    grid: GridSpec,
}

impl LayoutOptimizer {
    pub fn new(store: DynPheromoneStore) -> Self {
        Self {
            store,
            grid: GridSpec::default(),
        }
    }

    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Optimize and return the rearranged beds.
    ///
    /// The result is always a permutation of the input by id.
    pub fn run(&self, beds: &[Bed], config: &AcoConfig) -> Result<Vec<Bed>> {
        Ok(self.optimize(beds, config)?.beds)
    }

    /// Optimize and return the full report.
    pub fn optimize(&self, beds: &[Bed], config: &AcoConfig) -> Result<OptimizationReport> {
        self.optimize_with(beds, config, |_| {})
    }

    /// Optimize, calling `observer` after every iteration barrier.
    pub fn optimize_with<F>(
        &self,
        beds: &[Bed],
        config: &AcoConfig,
        mut observer: F,
    ) -> Result<OptimizationReport>
    where
        F: FnMut(&IterationProgress),
    {
        config.validate()?;
        if beds.len() <= 1 {
            return Ok(OptimizationReport::trivial(beds.to_vec()));
        }
        validate_beds(beds)?;

        let run_id = RunId::new();
        let span = info_span!("aco_run", run_id = %run_id, beds = beds.len());
        let _guard = span.enter();

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let ids: Vec<BedId> = beds.iter().map(|b| b.id.clone()).collect();
        let mut pheromones = PheromoneMap::new(self.store.clone());
        pheromones.load(&ids);

        let mut best: Option<Tour> = None;
        let mut history = Vec::with_capacity(config.iterations);
        let mut fallback_steps = 0;

        for iteration in 0..config.iterations {
            let ants: Vec<Tour> = (0..config.ant_count)
                .map(|_| construct_tour(beds, &pheromones, config.alpha, config.beta, &mut rng))
                .collect();

            let mut iteration_best = f64::NEG_INFINITY;
            for ant in &ants {
                fallback_steps += ant.fallback_steps;
                iteration_best = iteration_best.max(ant.fitness);
                if best.as_ref().map_or(true, |b| ant.fitness > b.fitness) {
                    best = Some(ant.clone());
                }
            }

            // Barrier: global evaporation, then every ant's deposit.
            pheromones.evaporate(config.evaporation_rate);
            for ant in &ants {
                pheromones.deposit(&ant.bed_ids(beds), ant.deposit_amount());
            }

            let overall_best = best.as_ref().map_or(iteration_best, |b| b.fitness);
            history.push(overall_best);
            debug!(iteration, iteration_best, overall_best, "iteration complete");
            observer(&IterationProgress {
                iteration,
                total_iterations: config.iterations,
                iteration_best,
                overall_best,
            });
        }

        let identity: Vec<usize> = (0..beds.len()).collect();
        let initial_fitness = order_fitness(beds, &identity);

        // ant_count >= 1 and iterations >= 1, so at least one tour exists.
        let best = best.unwrap_or_else(|| Tour {
            order: identity,
            fitness: initial_fitness,
            fallback_steps: 0,
        });

        let arranged = arrange(beds, &best.order, config.layout, &self.grid);

        info!(
            best_length = best.length(),
            initial_fitness,
            degraded_writes = pheromones.degraded_writes(),
            "optimization finished"
        );

        Ok(OptimizationReport {
            run_id,
            best_tour: best.bed_ids(beds),
            beds: arranged,
            best_fitness: best.fitness,
            initial_fitness,
            history,
            iterations_run: config.iterations,
            fallback_steps,
            degraded_writes: pheromones.degraded_writes(),
        })
    }
}

/// Lay beds out in tour order according to `strategy`.
pub fn arrange(beds: &[Bed], order: &[usize], strategy: LayoutStrategy, grid: &GridSpec) -> Vec<Bed> {
    order
        .iter()
        .enumerate()
        .map(|(slot, &i)| {
            let mut bed = beds[i].clone();
            if strategy == LayoutStrategy::Serpentine {
                bed.position = grid.serpentine_position(slot);
            }
            bed
        })
        .collect()
}
