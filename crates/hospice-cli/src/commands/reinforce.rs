//! Record the outcome of an assignment made elsewhere.

use anyhow::Result;
use colored::Colorize;
use hospice::prelude::*;
use std::sync::Arc;

use crate::config::Config;

pub fn run(hospital: &str, bed: &str, failure: bool) -> Result<()> {
    let config = Config::load()?;
    let selector = AdmissionSelector::new(
        Arc::new(InMemoryBedProvider::default()),
        config.open_store()?,
        config.admission.clone(),
    )?;

    let level = selector.reinforce(&HospitalId::from(hospital), &BedId::from(bed), !failure)?;
    let verb = if failure { "Penalised".red() } else { "Reinforced".green() };
    println!("{} {} {}/{} → {:.3}", "✓".green(), verb, hospital, bed, level);
    Ok(())
}
