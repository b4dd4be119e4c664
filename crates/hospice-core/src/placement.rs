//! Grid placement and normalisation of loosely typed bed records.
//!
//! Bed records arrive from storage with positions that may be missing,
//! encoded as a JSON string, or not numeric at all. Display must always
//! proceed, so anything unusable lands on a deterministic grid slot.

use crate::error::{InputError, Result};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fallback grid inside a ~600x400 floor area with margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default = "default_spacing")]
    pub spacing_x: f64,
    #[serde(default = "default_spacing")]
    pub spacing_y: f64,
    #[serde(default = "default_offset")]
    pub offset_x: f64,
    #[serde(default = "default_offset")]
    pub offset_y: f64,
}

fn default_columns() -> usize { 8 }
fn default_spacing() -> f64 { 70.0 }
fn default_offset() -> f64 { 40.0 }

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            spacing_x: default_spacing(),
            spacing_y: default_spacing(),
            offset_x: default_offset(),
            offset_y: default_offset(),
        }
    }
}

impl GridSpec {
    fn columns(&self) -> usize {
        self.columns.max(1)
    }

    /// Row-major slot for `index`.
    pub fn position(&self, index: usize) -> Position {
        let cols = self.columns();
        Position::new(
            self.offset_x + (index % cols) as f64 * self.spacing_x,
            self.offset_y + (index / cols) as f64 * self.spacing_y,
        )
    }

    /// Boustrophedon slot for `index`: even rows run left to right,
    /// odd rows right to left.
    pub fn serpentine_position(&self, index: usize) -> Position {
        let cols = self.columns();
        let row = index / cols;
        let col = if row % 2 == 0 { index % cols } else { cols - 1 - index % cols };
        Position::new(
            self.offset_x + col as f64 * self.spacing_x,
            self.offset_y + row as f64 * self.spacing_y,
        )
    }
}

/// A bed record as stored by external collaborators, before normalisation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBed {
    pub id: String,
    #[serde(default)]
    pub hospital_id: Option<String>,
    #[serde(default)]
    pub ward: String,
    #[serde(default)]
    pub bed_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub position: Option<serde_json::Value>,
}

impl RawBed {
    /// Normalise into a [`Bed`]. `index` picks the grid slot used when the
    /// position cannot be parsed.
    pub fn into_bed(self, index: usize, grid: &GridSpec) -> Bed {
        let position = parse_position(self.position.as_ref()).unwrap_or_else(|| grid.position(index));
        Bed {
            bed_number: self.bed_number.unwrap_or_else(|| self.id.clone()),
            id: BedId(self.id),
            hospital_id: self.hospital_id.map(HospitalId),
            ward: self.ward,
            status: self.status.as_deref().map(BedStatus::from_label).unwrap_or_default(),
            priority: self.priority.as_deref().map(BedPriority::from_label).unwrap_or_default(),
            position,
        }
    }
}

/// Normalise a list of raw records, assigning grid slots by list index.
pub fn normalize_beds(raw: Vec<RawBed>, grid: &GridSpec) -> Vec<Bed> {
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| r.into_bed(i, grid))
        .collect()
}

/// Parse a stored position: an `{x, y}` object or a string holding one.
pub fn parse_position(value: Option<&serde_json::Value>) -> Option<Position> {
    match value? {
        serde_json::Value::String(s) => {
            let parsed: serde_json::Value = serde_json::from_str(s).ok()?;
            position_from_object(&parsed)
        }
        other => position_from_object(other),
    }
}

fn position_from_object(value: &serde_json::Value) -> Option<Position> {
    let x = value.get("x")?.as_f64()?;
    let y = value.get("y")?.as_f64()?;
    let pos = Position::new(x, y);
    pos.is_finite().then_some(pos)
}

/// Check the working set forms a valid key space: non-empty, unique ids.
pub fn validate_beds(beds: &[Bed]) -> Result<()> {
    let mut seen = HashSet::with_capacity(beds.len());
    for (i, bed) in beds.iter().enumerate() {
        if bed.id.0.trim().is_empty() {
            return Err(InputError::EmptyId(i).into());
        }
        if !seen.insert(&bed.id) {
            return Err(InputError::DuplicateId(bed.id.0.clone()).into());
        }
    }
    Ok(())
}

/// Total distance between consecutive positions.
pub fn path_length<'a>(positions: impl IntoIterator<Item = &'a Position>) -> f64 {
    let mut total = 0.0;
    let mut prev: Option<&Position> = None;
    for p in positions {
        if let Some(q) = prev {
            total += q.distance_to(p);
        }
        prev = Some(p);
    }
    total
}

/// Consecutive distance of `count` beds placed row-major on `grid`.
pub fn sequential_grid_length(count: usize, grid: &GridSpec) -> f64 {
    let slots: Vec<Position> = (0..count).map(|i| grid.position(i)).collect();
    path_length(&slots)
}
