//! CLI command implementations.

pub mod init;
pub mod optimize;
pub mod select;
pub mod admit;
pub mod reinforce;
pub mod pheromones;

use anyhow::{Context, Result};
use hospice::prelude::*;
use std::path::Path;

/// Read a JSON bed file into a provider, normalising loose records.
pub(crate) fn load_beds(path: &Path, grid: &GridSpec) -> Result<InMemoryBedProvider> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bed file: {}", path.display()))?;
    InMemoryBedProvider::from_json(&content, grid)
        .with_context(|| format!("Failed to parse bed file: {}", path.display()))
}

/// Write beds back as pretty JSON.
pub(crate) fn save_beds(path: &Path, beds: &[Bed]) -> Result<()> {
    let content = serde_json::to_string_pretty(beds).context("Failed to serialize beds")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write bed file: {}", path.display()))
}
