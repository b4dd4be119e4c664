//! Ant tours: probabilistic construction and fitness.
//!
//! An ant starts on a uniformly random bed and keeps walking to an unvisited
//! bed chosen by roulette over `tau^alpha * eta^beta` until every bed has
//! been visited exactly once. Fitness is the negated path length, so higher
//! is better and a single-bed tour scores zero.

use crate::pheromone_map::PheromoneMap;
use hospice_core::heuristic::{distance, heuristic, selection_weight};
use hospice_core::selection::{roulette, Fallback};
use hospice_core::types::{Bed, BedId};
use rand::Rng;

/// Shortest total distance used as a deposit denominator.
pub const MIN_DEPOSIT_DISTANCE: f64 = 1.0;

/// One ant's walk over the working set.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Indices into the bed slice, in visiting order.
    pub order: Vec<usize>,
    /// Negated total path length.
    pub fitness: f64,
    /// Steps where the weights were degenerate and the first unvisited
    /// bed was taken.
    pub fallback_steps: usize,
}

impl Tour {
    /// Bed ids in visiting order.
    pub fn bed_ids(&self, beds: &[Bed]) -> Vec<BedId> {
        self.order.iter().map(|&i| beds[i].id.clone()).collect()
    }

    /// Total distance walked.
    pub fn length(&self) -> f64 {
        -self.fitness
    }

    /// Pheromone this tour deposits on each of its edges.
    pub fn deposit_amount(&self) -> f64 {
        deposit_amount(self.fitness)
    }
}

/// Walk one ant over all `beds`.
pub fn construct_tour<R: Rng + ?Sized>(
    beds: &[Bed],
    pheromones: &PheromoneMap,
    alpha: f64,
    beta: f64,
    rng: &mut R,
) -> Tour {
    let n = beds.len();
    if n == 0 {
        return Tour { order: Vec::new(), fitness: 0.0, fallback_steps: 0 };
    }

    let mut unvisited: Vec<usize> = (0..n).collect();
    let mut order = Vec::with_capacity(n);
    let mut fallback_steps = 0;

    let mut current = unvisited.remove(rng.gen_range(0..n));
    order.push(current);

    let mut weights = Vec::with_capacity(n);
    while !unvisited.is_empty() {
        weights.clear();
        let here = &beds[current];
        weights.extend(unvisited.iter().map(|&j| {
            let there = &beds[j];
            selection_weight(pheromones.get(&here.id, &there.id), heuristic(here, there), alpha, beta)
        }));

        let pick = match roulette(&weights, rng, Fallback::First) {
            Some(p) => p,
            None => break,
        };
        if pick.is_fallback() {
            fallback_steps += 1;
        }

        current = unvisited.remove(pick.index());
        order.push(current);
    }

    let fitness = order_fitness(beds, &order);
    Tour { order, fitness, fallback_steps }
}

/// `-Σ distance(path[i], path[i+1])`.
pub fn path_fitness(path: &[Bed]) -> f64 {
    -path.windows(2).map(|w| distance(&w[0], &w[1])).sum::<f64>()
}

/// Fitness of a visiting order given as indices into `beds`.
pub fn order_fitness(beds: &[Bed], order: &[usize]) -> f64 {
    -order
        .windows(2)
        .map(|w| distance(&beds[w[0]], &beds[w[1]]))
        .sum::<f64>()
}

/// `1 / |fitness|` with the denominator floored at [`MIN_DEPOSIT_DISTANCE`],
/// so zero-length tours deposit a finite amount.
pub fn deposit_amount(fitness: f64) -> f64 {
    1.0 / fitness.abs().max(MIN_DEPOSIT_DISTANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::InMemoryPheromoneStore;
    use hospice_core::types::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn bed(id: &str, x: f64, y: f64) -> Bed {
        Bed::new(id, "General", Position::new(x, y))
    }

    fn loaded_map(beds: &[Bed]) -> PheromoneMap {
        let mut map = PheromoneMap::new(Arc::new(InMemoryPheromoneStore::new()));
        let ids: Vec<BedId> = beds.iter().map(|b| b.id.clone()).collect();
        map.load(&ids);
        map
    }

    #[test]
    fn tour_is_a_full_permutation() {
        let beds: Vec<Bed> = (0..12)
            .map(|i| bed(&format!("b{i}"), (i * 7 % 5) as f64, (i * 3 % 4) as f64))
            .collect();
        let map = loaded_map(&beds);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            let tour = construct_tour(&beds, &map, 1.0, 2.0, &mut rng);
            assert_eq!(tour.order.len(), beds.len());
            let unique: HashSet<usize> = tour.order.iter().copied().collect();
            assert_eq!(unique.len(), beds.len());
            assert!(tour.fitness <= 0.0);
            assert_eq!(tour.fallback_steps, 0);
        }
    }

    #[test]
    fn fitness_is_non_positive_and_zero_for_trivial_paths() {
        assert_eq!(path_fitness(&[]), 0.0);
        assert_eq!(path_fitness(&[bed("a", 5.0, 5.0)]), 0.0);
        let path = [bed("a", 0.0, 0.0), bed("b", 3.0, 4.0), bed("c", 3.0, 10.0)];
        assert_eq!(path_fitness(&path), -11.0);
    }

    #[test]
    fn zero_length_tour_deposits_finite_amount() {
        assert_eq!(deposit_amount(0.0), 1.0);
        assert_eq!(deposit_amount(-20.0), 0.05);
        assert!(deposit_amount(-0.001).is_finite());
    }

    #[test]
    fn degenerate_weights_fall_back_to_first_unvisited() {
        let beds = vec![bed("a", 0.0, 0.0), bed("b", 1.0, 0.0), bed("c", 2.0, 0.0)];
        let mut map = loaded_map(&beds);
        for a in &beds {
            for b in &beds {
                if a.id != b.id {
                    map.set(&a.id, &b.id, 0.0);
                }
            }
        }
        let mut rng = StdRng::seed_from_u64(11);
        let tour = construct_tour(&beds, &map, 1.0, 2.0, &mut rng);

        assert_eq!(tour.fallback_steps, 2);
        let mut rest: Vec<usize> = (0..3).filter(|i| *i != tour.order[0]).collect();
        rest.sort_unstable();
        assert_eq!(&tour.order[1..], &rest[..]);
    }

    #[test]
    fn empty_and_single_bed_sets() {
        let map = loaded_map(&[]);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(construct_tour(&[], &map, 1.0, 2.0, &mut rng).order.is_empty());
        let one = [bed("solo", 1.0, 1.0)];
        let tour = construct_tour(&one, &map, 1.0, 2.0, &mut rng);
        assert_eq!(tour.order, vec![0]);
        assert_eq!(tour.fitness, 0.0);
    }
}
