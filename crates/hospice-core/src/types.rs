//! Shared types used across the layout optimizer and the admission selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a bed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BedId(pub String);

impl BedId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BedId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BedId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque identifier of a hospital.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HospitalId(pub String);

impl HospitalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HospitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HospitalId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HospitalId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier for one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position on the facility floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Occupancy status of a bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedStatus {
    Available,
    Occupied,
    Maintenance,
    Reserved,
}

impl BedStatus {
    /// Parse a status label case-insensitively. Unknown labels read as available.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "occupied" => BedStatus::Occupied,
            "maintenance" => BedStatus::Maintenance,
            "reserved" => BedStatus::Reserved,
            _ => BedStatus::Available,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BedStatus::Available => "available",
            BedStatus::Occupied => "occupied",
            BedStatus::Maintenance => "maintenance",
            BedStatus::Reserved => "reserved",
        }
    }
}

impl Default for BedStatus {
    fn default() -> Self {
        BedStatus::Available
    }
}

impl fmt::Display for BedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Care priority attached to a bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedPriority {
    Low,
    Medium,
    High,
}

impl BedPriority {
    /// Parse a priority label case-insensitively. Unknown labels read as medium.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => BedPriority::Low,
            "high" => BedPriority::High,
            _ => BedPriority::Medium,
        }
    }
}

impl Default for BedPriority {
    fn default() -> Self {
        BedPriority::Medium
    }
}

/// A hospital bed as seen by the optimizer and the admission selector.
///
/// `position` is always defined; records without a usable position are
/// placed on the fallback grid when they are normalised (see
/// [`crate::placement::RawBed`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub id: BedId,
    #[serde(default)]
    pub hospital_id: Option<HospitalId>,
    pub ward: String,
    #[serde(default)]
    pub bed_number: String,
    #[serde(default)]
    pub status: BedStatus,
    #[serde(default)]
    pub priority: BedPriority,
    pub position: Position,
}

impl Bed {
    /// Create an available, medium-priority bed.
    pub fn new(id: impl Into<BedId>, ward: impl Into<String>, position: Position) -> Self {
        let id = id.into();
        Self {
            bed_number: id.0.clone(),
            id,
            hospital_id: None,
            ward: ward.into(),
            status: BedStatus::Available,
            priority: BedPriority::Medium,
            position,
        }
    }

    pub fn with_hospital(mut self, hospital: impl Into<HospitalId>) -> Self {
        self.hospital_id = Some(hospital.into());
        self
    }

    pub fn with_status(mut self, status: BedStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: BedPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_bed_number(mut self, number: impl Into<String>) -> Self {
        self.bed_number = number.into();
        self
    }
}

/// Composite key of an admission pheromone scalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScalarKey {
    pub hospital_id: HospitalId,
    pub bed_id: BedId,
}

impl ScalarKey {
    pub fn new(hospital_id: impl Into<HospitalId>, bed_id: impl Into<BedId>) -> Self {
        Self {
            hospital_id: hospital_id.into(),
            bed_id: bed_id.into(),
        }
    }

    /// Flat `"<hospital>-<bed>"` label. Not unique; stores key by the pair.
    pub fn storage_id(&self) -> String {
        format!("{}-{}", self.hospital_id, self.bed_id)
    }
}

impl fmt::Display for ScalarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hospital_id, self.bed_id)
    }
}

/// One persisted edge-keyed trail value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailRecord {
    pub from: BedId,
    pub to: BedId,
    pub value: f64,
}

impl TrailRecord {
    pub fn new(from: BedId, to: BedId, value: f64) -> Self {
        Self { from, to, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_are_lenient() {
        assert_eq!(BedStatus::from_label("OCCUPIED"), BedStatus::Occupied);
        assert_eq!(BedStatus::from_label(" reserved "), BedStatus::Reserved);
        assert_eq!(BedStatus::from_label("???"), BedStatus::Available);
        assert_eq!(BedPriority::from_label("High"), BedPriority::High);
        assert_eq!(BedPriority::from_label(""), BedPriority::Medium);
    }

    #[test]
    fn bed_serializes_camel_case() {
        let bed = Bed::new("b1", "ICU", Position::new(1.0, 2.0)).with_hospital("h1");
        let json = serde_json::to_value(&bed).unwrap();
        assert_eq!(json["id"], "b1");
        assert_eq!(json["hospitalId"], "h1");
        assert_eq!(json["bedNumber"], "b1");
        assert_eq!(json["status"], "available");
        assert_eq!(json["priority"], "medium");

        let labelled = bed.with_bed_number("ICU-07").with_priority(BedPriority::High);
        let json = serde_json::to_value(&labelled).unwrap();
        assert_eq!(json["bedNumber"], "ICU-07");
        assert_eq!(json["priority"], "high");
    }

    #[test]
    fn scalar_key_storage_id() {
        let key = ScalarKey::new("h1", "bedA");
        assert_eq!(key.storage_id(), "h1-bedA");
    }
}
