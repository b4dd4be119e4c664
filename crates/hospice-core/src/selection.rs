//! Roulette-wheel selection shared by tour construction and admission.
//!
//! A single uniform draw is compared against the running cumulative weight.
//! When the total mass is zero or not finite there is nothing to sample
//! from, and the caller's documented fallback index is returned instead.
//! The outcome records which of the two happened.

use rand::Rng;

/// Which candidate to take when the probability mass is degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// First candidate in iteration order (tour construction).
    First,
    /// Last candidate in iteration order (admission).
    Last,
}

/// Result of one roulette spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Index sampled proportionally to its weight.
    Sampled(usize),
    /// Weights were degenerate; the fallback index was used.
    Fallback(usize),
}

impl Pick {
    pub fn index(&self) -> usize {
        match *self {
            Pick::Sampled(i) | Pick::Fallback(i) => i,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Pick::Fallback(_))
    }
}

/// Spin the wheel over `weights`. Returns `None` only for an empty slice.
///
/// Negative and NaN weights count as zero. Zero-weight candidates are never
/// sampled.
pub fn roulette<R: Rng + ?Sized>(weights: &[f64], rng: &mut R, fallback: Fallback) -> Option<Pick> {
    if weights.is_empty() {
        return None;
    }
    let fallback_index = match fallback {
        Fallback::First => 0,
        Fallback::Last => weights.len() - 1,
    };

    let total: f64 = weights.iter().map(|w| sanitize(*w)).sum();
    if !(total.is_finite() && total > 0.0) {
        return Some(Pick::Fallback(fallback_index));
    }

    let draw = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += sanitize(*w);
        if draw < cumulative {
            return Some(Pick::Sampled(i));
        }
    }

    // Rounding left the draw just past the final cumulative sum.
    Some(Pick::Fallback(fallback_index))
}

fn sanitize(w: f64) -> f64 {
    if w > 0.0 {
        w
    } else {
        0.0
    }
}
