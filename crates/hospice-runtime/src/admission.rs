//! Admission selector: persistent pheromone choice of a single bed.
//!
//! Each (hospital, bed) pair carries a durable pheromone scalar. Selection
//! spins the same roulette wheel the layout ants use, over the available
//! beds of one ward. Reinforcement rewards a bed that was successfully
//! assigned and penalises one whose assignment failed downstream, so the
//! colony drifts toward beds that actually work out.

use crate::backend::DynPheromoneStore;
use hospice_core::config::AdmissionConfig;
use hospice_core::error::Result;
use hospice_core::heuristic::selection_weight;
use hospice_core::provider::{BedDesirability, BedProvider, UniformDesirability};
use hospice_core::selection::{roulette, Fallback};
use hospice_core::store::DEFAULT_PHEROMONE;
use hospice_core::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Scalar written the first time a bed is reinforced after a success.
pub const FIRST_SUCCESS_LEVEL: f64 = 1.5;
/// Scalar written the first time a bed is reinforced after a failure.
pub const FIRST_FAILURE_LEVEL: f64 = 0.5;
/// Added to an existing scalar on success.
pub const SUCCESS_DELTA: f64 = 1.0;
/// Added to an existing scalar on failure.
pub const FAILURE_DELTA: f64 = -0.5;
/// Scalars never drop below this.
pub const MIN_LEVEL: f64 = 0.1;

/// Next scalar value after one reinforcement.
///
/// A missing scalar is created (not decayed from the 1.0 read default);
/// an existing one decays by `evaporation_rate` and takes the delta, then
/// is floored at [`MIN_LEVEL`].
pub fn reinforced_level(existing: Option<f64>, success: bool, evaporation_rate: f64) -> f64 {
    match existing {
        None if success => FIRST_SUCCESS_LEVEL,
        None => FIRST_FAILURE_LEVEL,
        Some(level) => {
            let delta = if success { SUCCESS_DELTA } else { FAILURE_DELTA };
            let next = level * (1.0 - evaporation_rate) + delta;
            if next.is_nan() {
                MIN_LEVEL
            } else {
                next.max(MIN_LEVEL)
            }
        }
    }
}

/// Result of the full admission workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdmissionOutcome {
    /// Bed assigned and marked occupied; `pheromone` is its new scalar.
    Admitted { bed_id: BedId, pheromone: f64 },
    /// The ward had no available bed.
    NoAvailableBed,
}

/// Picks beds for incoming patients and reinforces the outcome.
pub struct AdmissionSelector {
    provider: Arc<dyn BedProvider>,
    store: DynPheromoneStore,
    config: AdmissionConfig,
    desirability: Arc<dyn BedDesirability>,
    rng: Mutex<StdRng>,
}

impl AdmissionSelector {
    /// Create a selector. Fails if `config` is invalid.
    pub fn new(
        provider: Arc<dyn BedProvider>,
        store: DynPheromoneStore,
        config: AdmissionConfig,
    ) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            provider,
            store,
            config,
            desirability: Arc::new(UniformDesirability),
            rng: Mutex::new(rng),
        })
    }

    /// Replace the uniform heuristic with a per-bed desirability signal.
    pub fn with_desirability(mut self, desirability: impl BedDesirability + 'static) -> Self {
        self.desirability = Arc::new(desirability);
        self
    }

    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// Choose one available bed in `(hospital, ward)`.
    ///
    /// Returns `Ok(None)` when the ward has no available bed. Bed status is
    /// never changed here. `priority` is the patient's priority; it is
    /// logged but does not yet weight the choice.
    pub fn select_bed(&self, hospital: &HospitalId, ward: &str, priority: u8) -> Result<Option<BedId>> {
        let candidates = self
            .provider
            .list_beds(hospital, Some(ward), Some(BedStatus::Available))?;
        if candidates.is_empty() {
            info!(%hospital, ward, priority, "no available bed");
            return Ok(None);
        }

        let levels = match self.store.scalars_for(hospital) {
            Ok(levels) => levels,
            Err(e) => {
                warn!(%hospital, error = %e, "pheromone read failed; using default levels");
                Default::default()
            }
        };

        let weights: Vec<f64> = candidates
            .iter()
            .map(|bed| {
                let tau = levels.get(&bed.id).copied().unwrap_or(DEFAULT_PHEROMONE);
                let eta = self.desirability.desirability(bed);
                selection_weight(tau, eta, self.config.alpha, self.config.beta)
            })
            .collect();

        let pick = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            roulette(&weights, &mut *rng, Fallback::Last)
        };

        Ok(pick.map(|pick| {
            let chosen = candidates[pick.index()].id.clone();
            if pick.is_fallback() {
                debug!(%hospital, ward, bed = %chosen, "degenerate weights; took last candidate");
            } else {
                debug!(%hospital, ward, bed = %chosen, priority, "bed selected");
            }
            chosen
        }))
    }

    /// Reward (`success`) or penalise one bed's scalar and persist it.
    ///
    /// The read-modify-write is atomic per key in the store, and the new
    /// value is durable when this returns. Returns the stored value.
    pub fn reinforce(&self, hospital: &HospitalId, bed: &BedId, success: bool) -> Result<f64> {
        let key = ScalarKey::new(hospital.clone(), bed.clone());
        let rate = self.config.evaporation_rate;
        let level = self
            .store
            .update_scalar(&key, &mut |existing| reinforced_level(existing, success, rate))?;
        debug!(key = %key, success, level, "pheromone reinforced");
        Ok(level)
    }

    /// Current scalar for a bed, 1.0 if never reinforced.
    pub fn pheromone(&self, hospital: &HospitalId, bed: &BedId) -> Result<f64> {
        let key = ScalarKey::new(hospital.clone(), bed.clone());
        Ok(self.store.scalar(&key)?.unwrap_or(DEFAULT_PHEROMONE))
    }

    /// Select a bed, mark it occupied and reinforce the outcome.
    ///
    /// If marking the bed fails, the bed is penalised and the provider
    /// error is returned.
    pub fn admit(&self, hospital: &HospitalId, ward: &str, priority: u8) -> Result<AdmissionOutcome> {
        let Some(bed_id) = self.select_bed(hospital, ward, priority)? else {
            return Ok(AdmissionOutcome::NoAvailableBed);
        };

        if let Err(e) = self.provider.set_status(hospital, &bed_id, BedStatus::Occupied) {
            warn!(%hospital, bed = %bed_id, error = %e, "failed to occupy selected bed");
            if let Err(re) = self.reinforce(hospital, &bed_id, false) {
                warn!(%hospital, bed = %bed_id, error = %re, "failed to penalise bed");
            }
            return Err(e);
        }

        let pheromone = self.reinforce(hospital, &bed_id, true)?;
        info!(%hospital, ward, bed = %bed_id, pheromone, "patient admitted");
        Ok(AdmissionOutcome::Admitted { bed_id, pheromone })
    }
}
