//! In-memory bed provider.
//!
//! Stands in for the bed database: the CLI loads it from a JSON bed file,
//! tests build it from fixtures.

use hospice_core::error::{HospiceError, Result};
use hospice_core::placement::{normalize_beds, GridSpec, RawBed};
use hospice_core::provider::BedProvider;
use hospice_core::types::*;
use std::sync::RwLock;

/// Bed provider over a locked list of beds.
#[derive(Debug, Default)]
pub struct InMemoryBedProvider {
    beds: RwLock<Vec<Bed>>,
}

impl InMemoryBedProvider {
    pub fn new(beds: Vec<Bed>) -> Self {
        Self {
            beds: RwLock::new(beds),
        }
    }

    /// Load from a JSON array of loosely typed bed records.
    ///
    /// Records without a usable position land on `grid` by list index.
    pub fn from_json(json: &str, grid: &GridSpec) -> Result<Self> {
        let raw: Vec<RawBed> = serde_json::from_str(json)
            .map_err(|e| HospiceError::provider(format!("Invalid bed file: {}", e)))?;
        Ok(Self::new(normalize_beds(raw, grid)))
    }

    /// Serialize every bed as a pretty JSON array.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.snapshot()?)
            .map_err(|e| HospiceError::provider(format!("Failed to serialize beds: {}", e)))
    }

    /// Copy of every bed, in insertion order.
    pub fn snapshot(&self) -> Result<Vec<Bed>> {
        let beds = self
            .beds
            .read()
            .map_err(|e| HospiceError::provider(format!("Failed to acquire read lock: {}", e)))?;
        Ok(beds.clone())
    }

}

impl BedProvider for InMemoryBedProvider {
    fn list_beds(
        &self,
        hospital: &HospitalId,
        ward: Option<&str>,
        status: Option<BedStatus>,
    ) -> Result<Vec<Bed>> {
        let beds = self
            .beds
            .read()
            .map_err(|e| HospiceError::provider(format!("Failed to acquire read lock: {}", e)))?;

        Ok(beds
            .iter()
            .filter(|b| b.hospital_id.as_ref() == Some(hospital))
            .filter(|b| ward.map_or(true, |w| b.ward == w))
            .filter(|b| status.map_or(true, |s| b.status == s))
            .cloned()
            .collect())
    }

    fn set_status(&self, hospital: &HospitalId, bed: &BedId, status: BedStatus) -> Result<()> {
        let mut beds = self
            .beds
            .write()
            .map_err(|e| HospiceError::provider(format!("Failed to acquire write lock: {}", e)))?;

        let target = beds
            .iter_mut()
            .find(|b| &b.id == bed && b.hospital_id.as_ref() == Some(hospital))
            .ok_or_else(|| HospiceError::provider(format!("Bed not found: {}/{}", hospital, bed)))?;
        target.status = status;
        Ok(())
    }
}
