//! Pick a bed for an incoming patient without changing anything.

use anyhow::Result;
use colored::Colorize;
use hospice::prelude::*;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;

pub fn run(hospital: &str, ward: &str, priority: u8, beds: &str) -> Result<()> {
    let config = Config::load()?;
    let provider = Arc::new(super::load_beds(Path::new(beds), &config.grid)?);
    let selector = AdmissionSelector::new(provider, config.open_store()?, config.admission.clone())?;

    let hospital = HospitalId::from(hospital);
    match selector.select_bed(&hospital, ward, priority)? {
        Some(bed) => {
            let level = selector.pheromone(&hospital, &bed)?;
            println!(
                "{} Selected bed {} (pheromone {:.3})",
                "✓".green(),
                bed.to_string().cyan().bold(),
                level
            );
        }
        None => println!("{} No available bed in {} / {}", "•".yellow(), hospital, ward),
    }
    Ok(())
}
