//! Run configuration for the layout optimizer and the admission selector.
//!
//! Both configs are immutable once a run starts and are validated eagerly:
//! a bad evaporation rate or a zero ant count cannot produce a meaningful
//! result, so it is rejected before any pheromone is touched.

use crate::error::{HospiceError, Result};
use serde::{Deserialize, Serialize};

/// How the best tour is turned back into floor-plan positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// Lay the visiting order onto a boustrophedon grid, so consecutive
    /// beds of the tour are always grid neighbours.
    Serpentine,
    /// Keep every bed's original position; only the order changes.
    PreserveOriginal,
}

impl Default for LayoutStrategy {
    fn default() -> Self {
        LayoutStrategy::Serpentine
    }
}

/// Ant colony configuration for one layout optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcoConfig {
    /// Number of iterations (pheromone update rounds).
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Pheromone exponent.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Heuristic exponent.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Fraction of every trail removed per iteration, in (0, 1).
    #[serde(default = "default_evaporation")]
    pub evaporation_rate: f64,
    /// Ants per iteration.
    #[serde(default = "default_ant_count")]
    pub ant_count: usize,
    /// Seed for a reproducible run. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub layout: LayoutStrategy,
}

fn default_iterations() -> usize { 50 }
fn default_alpha() -> f64 { 1.0 }
fn default_beta() -> f64 { 2.0 }
fn default_evaporation() -> f64 { 0.5 }
fn default_ant_count() -> usize { 20 }

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            alpha: default_alpha(),
            beta: default_beta(),
            evaporation_rate: default_evaporation(),
            ant_count: default_ant_count(),
            seed: None,
            layout: LayoutStrategy::default(),
        }
    }
}

impl AcoConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_ant_count(mut self, ant_count: usize) -> Self {
        self.ant_count = ant_count;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_layout(mut self, layout: LayoutStrategy) -> Self {
        self.layout = layout;
        self
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(HospiceError::invalid_config("iterations", self.iterations, "must be positive"));
        }
        if self.ant_count == 0 {
            return Err(HospiceError::invalid_config("ant_count", self.ant_count, "must be positive"));
        }
        validate_exponents(self.alpha, self.beta)?;
        validate_evaporation(self.evaporation_rate)
    }
}

/// Configuration of the persistent admission selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionConfig {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Decay applied to a scalar on each reinforcement, in (0, 1).
    #[serde(default = "default_admission_evaporation")]
    pub evaporation_rate: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_admission_evaporation() -> f64 { 0.1 }

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            beta: default_beta(),
            evaporation_rate: default_admission_evaporation(),
            seed: None,
        }
    }
}

impl AdmissionConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_exponents(self.alpha, self.beta)?;
        validate_evaporation(self.evaporation_rate)
    }
}

fn validate_exponents(alpha: f64, beta: f64) -> Result<()> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(HospiceError::invalid_config("alpha", alpha, "must be a finite value >= 0"));
    }
    if !beta.is_finite() || beta < 0.0 {
        return Err(HospiceError::invalid_config("beta", beta, "must be a finite value >= 0"));
    }
    Ok(())
}

fn validate_evaporation(rate: f64) -> Result<()> {
    if !(rate > 0.0 && rate < 1.0) {
        return Err(HospiceError::invalid_config(
            "evaporation_rate",
            rate,
            "must lie strictly between 0 and 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn defaults_are_valid() {
        let config = AcoConfig::default();
        assert_eq!(config.iterations, 50);
        assert_eq!(config.ant_count, 20);
        assert_eq!(config.alpha, 1.0);
        assert_eq!(config.beta, 2.0);
        assert_eq!(config.evaporation_rate, 0.5);
        assert!(config.validate().is_ok());
        assert!(AdmissionConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_evaporation_outside_open_interval() {
        for rate in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let err = AcoConfig::default().with_evaporation_rate(rate).validate().unwrap_err();
            match err {
                HospiceError::Config(ConfigError::InvalidValue { field, .. }) => {
                    assert_eq!(field, "evaporation_rate")
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn rejects_zero_counts_and_negative_exponents() {
        assert!(AcoConfig::default().with_iterations(0).validate().is_err());
        assert!(AcoConfig::default().with_ant_count(0).validate().is_err());
        assert!(AcoConfig::default().with_alpha(-1.0).validate().is_err());
        assert!(AdmissionConfig::default().with_beta(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn deserializes_partial_config() {
        let config: AcoConfig = serde_json::from_str(r#"{"iterations": 5, "layout": "preserve-original"}"#).unwrap();
        assert_eq!(config.iterations, 5);
        assert_eq!(config.ant_count, 20);
        assert_eq!(config.layout, LayoutStrategy::PreserveOriginal);
    }
}
