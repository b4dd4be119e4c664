//! Distance and visibility functions between beds.

use crate::types::Bed;

/// Euclidean distance between two beds.
pub fn distance(a: &Bed, b: &Bed) -> f64 {
    a.position.distance_to(&b.position)
}

/// Heuristic attractiveness of moving from `a` to `b`: `1 / (d + 1)`.
///
/// Bounded in (0, 1] and strictly decreasing with distance.
pub fn heuristic(a: &Bed, b: &Bed) -> f64 {
    1.0 / (distance(a, b) + 1.0)
}

/// Selection weight `tau^alpha * eta^beta`.
pub fn selection_weight(pheromone: f64, heuristic: f64, alpha: f64, beta: f64) -> f64 {
    pheromone.powf(alpha) * heuristic.powf(beta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn bed(id: &str, x: f64, y: f64) -> Bed {
        Bed::new(id, "General", Position::new(x, y))
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(&bed("a", 0.0, 0.0), &bed("b", 3.0, 4.0)), 5.0);
    }

    #[test]
    fn heuristic_bounded_and_decreasing() {
        let a = bed("a", 0.0, 0.0);
        assert_eq!(heuristic(&a, &a), 1.0);
        let near = heuristic(&a, &bed("n", 1.0, 0.0));
        let far = heuristic(&a, &bed("f", 100.0, 0.0));
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn weight_with_zero_exponents_is_one() {
        assert_eq!(selection_weight(3.0, 0.25, 0.0, 0.0), 1.0);
        assert_eq!(selection_weight(3.0, 0.5, 1.0, 2.0), 0.75);
    }
}
