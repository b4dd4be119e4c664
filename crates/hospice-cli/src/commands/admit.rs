//! Admit a patient: select, occupy and reinforce.

use anyhow::Result;
use colored::Colorize;
use hospice::prelude::*;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;

pub fn run(hospital: &str, ward: &str, priority: u8, beds: &str) -> Result<()> {
    let config = Config::load()?;
    let bed_file = Path::new(beds);
    let provider = Arc::new(super::load_beds(bed_file, &config.grid)?);
    let selector = AdmissionSelector::new(provider.clone(), config.open_store()?, config.admission.clone())?;

    let hospital = HospitalId::from(hospital);
    match selector.admit(&hospital, ward, priority)? {
        AdmissionOutcome::Admitted { bed_id, pheromone } => {
            super::save_beds(bed_file, &provider.snapshot()?)?;
            println!(
                "{} Admitted to bed {} (pheromone {:.3})",
                "✓".green(),
                bed_id.to_string().cyan().bold(),
                pheromone
            );
            println!("  {} Updated {}", "✓".green(), bed_file.display());
        }
        AdmissionOutcome::NoAvailableBed => {
            println!("{} No available bed in {} / {}", "•".yellow(), hospital, ward);
        }
    }
    Ok(())
}
