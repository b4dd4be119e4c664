//! Collaborator contracts consumed at admission time.

use crate::error::Result;
use crate::types::*;

/// External source of bed records (a database, a JSON file, a test fixture).
pub trait BedProvider: Send + Sync {
    /// List beds in a hospital, optionally filtered by ward and status.
    fn list_beds(
        &self,
        hospital: &HospitalId,
        ward: Option<&str>,
        status: Option<BedStatus>,
    ) -> Result<Vec<Bed>>;

    /// Change the status of one bed.
    fn set_status(&self, hospital: &HospitalId, bed: &BedId, status: BedStatus) -> Result<()>;
}

/// Per-bed heuristic term for admission.
///
/// Distance to the nursing station or a comfort score plug in here; the
/// value must be positive for the bed to stay selectable.
pub trait BedDesirability: Send + Sync {
    fn desirability(&self, bed: &Bed) -> f64;
}

/// Every bed equally desirable (heuristic of 1.0).
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformDesirability;

impl BedDesirability for UniformDesirability {
    fn desirability(&self, _bed: &Bed) -> f64 {
        1.0
    }
}

impl<F> BedDesirability for F
where
    F: Fn(&Bed) -> f64 + Send + Sync,
{
    fn desirability(&self, bed: &Bed) -> f64 {
        self(bed)
    }
}
